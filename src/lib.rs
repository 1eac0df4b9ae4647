mod app;
mod commands;
mod error;

use app::QuitState;
use commands::sources::SharePicker;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Single-instance must be the first plugin: a losing second launch exits
    // before any other side effects, and the winner surfaces its window.
    let mut builder = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            log::info!("Second launch attempt, surfacing existing window");
            app::window::show_main_window(app);
        }))
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_process::init())
        .plugin(tauri_plugin_updater::Builder::new().build());

    #[cfg(desktop)]
    {
        builder = builder.plugin(tauri_plugin_global_shortcut::Builder::new().build());
    }

    #[cfg(target_os = "macos")]
    {
        builder = builder.plugin(tauri_plugin_macos_permissions::init());
    }

    let app = builder
        .manage(QuitState::default())
        .manage(SharePicker::default())
        .on_window_event(app::events::handle_window_event)
        .on_menu_event(commands::sources::handle_menu_event)
        .invoke_handler(tauri::generate_handler![
            commands::sources::select_share_source
        ])
        .setup(|app| {
            app::window::create_main_window(app.handle())?;

            #[cfg(desktop)]
            {
                app::tray::setup_system_tray(app)?;

                if let Err(e) = app::shortcuts::register_mute_shortcut(app) {
                    // The in-page fallback listener still covers the window
                    log::warn!("Global shortcut registration failed: {e}");
                }
            }

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                commands::permissions::ensure_media_access(handle).await;
            });

            // Startup update check; a no-op outside packaged builds
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                if let Err(e) = commands::updates::run_update_check(handle, false).await {
                    log::warn!("Startup update check failed: {e}");
                }
            });

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(app::events::handle_run_event);
}
