//! Main window creation and show/recreate.
//!
//! The shell owns exactly one logical window: a webview pointed at the remote
//! chat. Closing it hides it (see `events`); only the macOS reopen path can
//! ever observe it destroyed, in which case it is rebuilt here.

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::commands::mute;
use crate::error::DeClientResult;

/// Label of the one logical main window.
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

/// The remote chat application the shell hosts.
pub(crate) const CHAT_URL: &str = "https://chat.dannydedisco.eu";

const DEFAULT_WIDTH: f64 = 1024.0;
const DEFAULT_HEIGHT: f64 = 800.0;

/// Create the main window, or surface it if it already exists.
pub fn create_main_window(app: &AppHandle) -> DeClientResult<WebviewWindow> {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.show();
        let _ = window.set_focus();
        return Ok(window);
    }

    let url = CHAT_URL
        .parse()
        .map_err(|e| crate::error::DeClientError::WindowError(format!("invalid chat URL: {e}")))?;

    let window = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .title(window_title(&app.package_info().version.to_string()))
        .inner_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
        .initialization_script(init_script().as_str())
        .build()?;

    log::info!("Created main window at {}", CHAT_URL);
    Ok(window)
}

/// Surface the main window: show, unminimize, focus.
///
/// Recreates the window if it was destroyed (macOS reopen after quitless
/// teardown). Safe to call from any event handler; a missing window is never
/// an error.
pub fn show_main_window(app: &AppHandle) {
    match app.get_webview_window(MAIN_WINDOW_LABEL) {
        Some(window) => {
            let _ = window.show();
            let _ = window.unminimize();
            let _ = window.set_focus();
        }
        None => {
            if let Err(e) = create_main_window(app) {
                log::error!("Failed to recreate main window: {e}");
            }
        }
    }
}

pub(crate) fn window_title(version: &str) -> String {
    format!("Danny DeClient v{version}")
}

/// Script injected into the hosted page before it loads.
///
/// Two hooks, both best-effort against content we do not control:
/// - an in-page F4 listener mirroring the global shortcut, for platforms
///   (Wayland) where the OS-level grab can fail;
/// - a `getDisplayMedia` wrapper that routes the share request through the
///   native source picker first and rejects when the user cancels.
pub(crate) fn init_script() -> String {
    format!(
        r#"(function () {{
    window.addEventListener('keydown', function (event) {{
        if (event.key === 'F4') {{
            {mute_toggle}
            event.preventDefault();
        }}
    }});

    if (!window.__TAURI__ || !navigator.mediaDevices || !navigator.mediaDevices.getDisplayMedia) {{
        return;
    }}
    var invoke = window.__TAURI__.core.invoke;
    var nativeGetDisplayMedia = navigator.mediaDevices.getDisplayMedia.bind(navigator.mediaDevices);
    navigator.mediaDevices.getDisplayMedia = function (constraints) {{
        return invoke('select_share_source').then(function (source) {{
            if (!source) {{
                return Promise.reject(new DOMException('Screen share cancelled', 'NotAllowedError'));
            }}
            console.log('DeClient: sharing ' + source.name);
            return nativeGetDisplayMedia(constraints);
        }});
    }};
}})();"#,
        mute_toggle = mute::toggle_mute_script()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_title_carries_version() {
        assert_eq!(window_title("0.6.2"), "Danny DeClient v0.6.2");
    }

    #[test]
    fn init_script_hooks_display_media() {
        let script = init_script();
        assert!(script.contains("getDisplayMedia"));
        assert!(script.contains("select_share_source"));
        // Cancellation must reject, not resolve with a bogus source
        assert!(script.contains("NotAllowedError"));
    }

    #[test]
    fn init_script_installs_fallback_hotkey() {
        let script = init_script();
        assert!(script.contains("keydown"));
        assert!(script.contains("'F4'"));
        assert!(script.contains(mute::MUTE_BUTTON_SELECTOR));
    }

    #[test]
    fn chat_url_is_https() {
        assert!(CHAT_URL.starts_with("https://"));
    }
}
