//! macOS media-access checks.
//!
//! The chat page needs microphone (and optionally camera) access for calls.
//! On macOS the shell checks at startup and requests access when it has not
//! been granted yet. Only a denial of the request we just issued gets a
//! dialog, with a shortcut to the Privacy & Security pane; everything else
//! is logged and swallowed.

#[cfg(target_os = "macos")]
const MICROPHONE_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Microphone";

#[cfg(target_os = "macos")]
pub async fn ensure_media_access(app: tauri::AppHandle) {
    use tauri_plugin_macos_permissions::{
        check_camera_permission, check_microphone_permission, check_screen_recording_permission,
        request_camera_permission, request_microphone_permission,
    };

    let microphone = check_microphone_permission().await;
    log::info!("Microphone access: {}", access_label(microphone));
    if !microphone {
        let _ = request_microphone_permission().await;
        if !check_microphone_permission().await {
            log::warn!("Microphone access denied");
            prompt_microphone_denied(&app);
        }
    }

    let camera = check_camera_permission().await;
    log::info!("Camera access: {}", access_label(camera));
    if !camera {
        let _ = request_camera_permission().await;
        log::info!(
            "Camera access after request: {}",
            access_label(check_camera_permission().await)
        );
    }

    log::info!(
        "Screen recording access: {}",
        access_label(check_screen_recording_permission().await)
    );
}

#[cfg(not(target_os = "macos"))]
pub async fn ensure_media_access(_app: tauri::AppHandle) {}

#[cfg(target_os = "macos")]
fn prompt_microphone_denied(app: &tauri::AppHandle) {
    use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
    use tauri_plugin_opener::OpenerExt;

    let handle = app.clone();
    app.dialog()
        .message(
            "Microphone access is denied.\n\nEnable Microphone access in System Settings > Privacy & Security to use audio calls.",
        )
        .title("Microphone Access Denied")
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancelCustom(
            "Open Settings".to_string(),
            "Cancel".to_string(),
        ))
        .show(move |open_settings| {
            if open_settings {
                if let Err(e) = handle
                    .opener()
                    .open_url(MICROPHONE_SETTINGS_URL, None::<&str>)
                {
                    log::error!("Failed to open privacy settings: {e}");
                }
            }
        });
}

#[cfg(target_os = "macos")]
fn access_label(granted: bool) -> &'static str {
    if granted {
        "granted"
    } else {
        "not granted"
    }
}

#[cfg(all(test, target_os = "macos"))]
mod tests {
    use super::*;

    #[test]
    fn settings_url_targets_the_microphone_pane() {
        assert!(MICROPHONE_SETTINGS_URL.contains("Privacy_Microphone"));
    }

    #[test]
    fn access_labels_are_human_readable() {
        assert_eq!(access_label(true), "granted");
        assert_eq!(access_label(false), "not granted");
    }
}
