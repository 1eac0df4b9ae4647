//! Global hotkey registration.
//!
//! One fixed binding: F4 toggles the microphone mute control inside the
//! hosted page. On Linux/Wayland the OS-level grab can fail or be held by
//! another application; registration failure is logged, never fatal, and the
//! in-page fallback listener (see `app::window`) still covers the window
//! while it is focused.

use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::commands::mute;
use crate::error::{DeClientError, DeClientResult};

/// The fixed mute-toggle binding.
pub const MUTE_SHORTCUT: &str = "F4";

/// Register the global mute shortcut.
pub fn register_mute_shortcut(app: &tauri::App) -> DeClientResult<()> {
    let shortcut: Shortcut = MUTE_SHORTCUT.parse().map_err(|e| {
        DeClientError::ShortcutError(format!("invalid shortcut {MUTE_SHORTCUT}: {e}"))
    })?;

    app.global_shortcut()
        .on_shortcut(shortcut, |app, _shortcut, event| {
            if event.state == ShortcutState::Pressed {
                log::debug!("Global mute shortcut pressed");
                mute::toggle_mute_in_page(app);
            }
        })
        .map_err(|e| DeClientError::ShortcutError(format!("failed to register {MUTE_SHORTCUT}: {e}")))?;

    log::info!("Registered global mute shortcut {MUTE_SHORTCUT}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_shortcut_parses() {
        assert!(MUTE_SHORTCUT.parse::<Shortcut>().is_ok());
    }
}
