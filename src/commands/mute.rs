//! Best-effort mute toggle against the hosted chat page.
//!
//! The shell has no contract with the page beyond this one DOM query: find a
//! button whose accessible title contains "mute microphone" and click it. The
//! control being absent is a logged no-op, not an error.

use tauri::AppHandle;

use crate::app::window::MAIN_WINDOW_LABEL;

/// Case-insensitive substring match on the button's title attribute.
pub(crate) const MUTE_BUTTON_SELECTOR: &str = r#"button[title*="mute microphone" i]"#;

/// The injected lookup. Both outcomes log to the page console so the "not
/// found" case is observable without being surfaced to the user.
pub(crate) fn toggle_mute_script() -> String {
    format!(
        r#"(function () {{
    var muteButton = document.querySelector('{MUTE_BUTTON_SELECTOR}');
    if (muteButton) {{
        muteButton.click();
        console.log('DeClient: toggled mute');
    }} else {{
        console.log('DeClient: mute control not found');
    }}
}})();"#
    )
}

/// Run the mute lookup inside the main window, if it is still live.
///
/// Called from the global shortcut handler; a torn-down window makes this a
/// no-op rather than an error.
pub fn toggle_mute_in_page(app: &AppHandle) {
    use tauri::Manager;

    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("Mute toggle ignored, main window is gone");
        return;
    };

    if let Err(e) = window.eval(toggle_mute_script().as_str()) {
        log::warn!("Failed to inject mute toggle: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_case_insensitive_substring_match() {
        assert!(MUTE_BUTTON_SELECTOR.contains(r#"title*="mute microphone" i"#));
    }

    #[test]
    fn script_embeds_selector_in_single_quotes() {
        // The selector itself uses double quotes; the script must wrap it in
        // single quotes to stay valid JS.
        let script = toggle_mute_script();
        assert!(script.contains(&format!("'{MUTE_BUTTON_SELECTOR}'")));
    }

    #[test]
    fn script_logs_when_control_is_absent() {
        let script = toggle_mute_script();
        assert!(script.contains("mute control not found"));
    }

    #[test]
    fn script_is_a_self_invoking_expression() {
        let script = toggle_mute_script();
        assert!(script.starts_with("(function ()"));
        assert!(script.ends_with("})();"));
    }
}
