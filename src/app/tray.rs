//! System tray setup and event handling.
//!
//! The tray is what keeps the shell reachable while the window is hidden:
//! Show App re-surfaces the window, Check for Updates runs an interactive
//! update check, Exit sets the quitting flag and terminates.

use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::TrayIconBuilder,
    App, Manager,
};

use crate::app::{window, QuitState};
use crate::commands;

pub(crate) const TRAY_SHOW_ID: &str = "show";
pub(crate) const TRAY_CHECK_UPDATES_ID: &str = "check-updates";
pub(crate) const TRAY_QUIT_ID: &str = "quit";

/// Set up the system tray with menu and event handlers.
pub fn setup_system_tray(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let show = MenuItem::with_id(app, TRAY_SHOW_ID, "Show App", true, None::<&str>)?;
    let check_updates = MenuItem::with_id(
        app,
        TRAY_CHECK_UPDATES_ID,
        "Check for Updates",
        true,
        None::<&str>,
    )?;
    let quit = MenuItem::with_id(app, TRAY_QUIT_ID, "Exit", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;

    let menu = Menu::with_items(app, &[&show, &check_updates, &separator, &quit])?;

    let tray_icon = Image::from_bytes(include_bytes!("../../icons/32x32.png"))
        .expect("Failed to load tray icon");

    let _tray = TrayIconBuilder::new()
        .icon(tray_icon)
        .tooltip("Danny DeClient")
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| match event.id.as_ref() {
            TRAY_SHOW_ID => window::show_main_window(app),
            TRAY_CHECK_UPDATES_ID => {
                let app_handle = app.clone();
                tauri::async_runtime::spawn(async move {
                    if let Err(e) = commands::updates::run_update_check(app_handle, true).await {
                        log::error!("Manual update check failed: {e}");
                    }
                });
            }
            TRAY_QUIT_ID => {
                // Flag first, then exit: the close handler must see the flag
                app.state::<QuitState>().request_quit();
                app.exit(0);
            }
            _ => {}
        })
        .on_tray_icon_event(|tray, event| {
            if let tauri::tray::TrayIconEvent::Click {
                button: tauri::tray::MouseButton::Left,
                button_state: tauri::tray::MouseButtonState::Up,
                ..
            } = event
            {
                window::show_main_window(tray.app_handle());
            }
        })
        .build(app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_menu_ids_are_distinct() {
        assert_ne!(TRAY_SHOW_ID, TRAY_CHECK_UPDATES_ID);
        assert_ne!(TRAY_SHOW_ID, TRAY_QUIT_ID);
        assert_ne!(TRAY_CHECK_UPDATES_ID, TRAY_QUIT_ID);
    }
}
