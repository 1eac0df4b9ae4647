//! Window and run event handlers.
//!
//! The close handler implements the tray-resident lifecycle: closing the main
//! window hides it unless a quit path has already set the quitting flag.

use tauri::{AppHandle, Manager, RunEvent, Window, WindowEvent};

use crate::app::window::MAIN_WINDOW_LABEL;
use crate::app::QuitState;

/// What the close handler does with a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Keep the process and tray alive; the window stays retrievable via Show.
    HideToTray,
    /// Let the window actually close.
    Destroy,
}

/// Decide between hiding and destroying. The flag is only ever evaluated
/// here, inside the close callback, strictly after any quit action that
/// could have set it.
pub fn close_action(quitting: bool) -> CloseAction {
    if quitting {
        CloseAction::Destroy
    } else {
        CloseAction::HideToTray
    }
}

/// Handle window events for the application.
///
/// This is called from the Tauri builder's `on_window_event` hook.
pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    if let WindowEvent::CloseRequested { api, .. } = event {
        let quit = window.state::<QuitState>();
        match close_action(quit.is_quitting()) {
            CloseAction::HideToTray => {
                api.prevent_close();
                let _ = window.hide();
            }
            CloseAction::Destroy => {}
        }
    }
}

/// Handle application run events.
///
/// This is passed to `app.run` after the builder is built.
pub fn handle_run_event(app: &AppHandle, event: RunEvent) {
    if let RunEvent::ExitRequested { .. } = &event {
        // OS-initiated termination counts as a quit path: any close request
        // racing teardown must destroy instead of hide.
        app.state::<QuitState>().request_quit();
        log::info!("Exit requested, allowing window teardown");
    }

    // Dock click on macOS reopens (and recreates, if needed) the window
    #[cfg(target_os = "macos")]
    if let RunEvent::Reopen { .. } = &event {
        crate::app::window::show_main_window(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_hides_while_not_quitting() {
        assert_eq!(close_action(false), CloseAction::HideToTray);
    }

    #[test]
    fn close_destroys_once_quitting() {
        assert_eq!(close_action(true), CloseAction::Destroy);
    }

    #[test]
    fn repeated_closes_keep_hiding_until_quit() {
        // Any sequence of close events with the flag unset hides every time
        for _ in 0..5 {
            assert_eq!(close_action(false), CloseAction::HideToTray);
        }
        assert_eq!(close_action(true), CloseAction::Destroy);
    }
}
