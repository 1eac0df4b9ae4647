//! Application lifecycle and platform integration.
//!
//! - `window`: Main window creation and show/recreate
//! - `tray`: System tray setup and menu handling
//! - `events`: Window and run event handlers
//! - `shortcuts`: Global hotkey registration

use std::sync::atomic::{AtomicBool, Ordering};

pub mod events;
pub mod window;

#[cfg(desktop)]
pub mod shortcuts;
#[cfg(desktop)]
pub mod tray;

/// Process-wide gate between "hide on close" and "allow actual termination".
///
/// Only explicit quit paths (tray Exit, an exit-requested run event) ever set
/// it; the close handler reads it. All writes happen on the event loop.
#[derive(Default)]
pub struct QuitState {
    quitting: AtomicBool,
}

impl QuitState {
    pub fn request_quit(&self) {
        self.quitting.store(true, Ordering::Relaxed);
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_state_starts_not_quitting() {
        let state = QuitState::default();
        assert!(!state.is_quitting());
    }

    #[test]
    fn quit_state_is_sticky_once_requested() {
        let state = QuitState::default();
        state.request_quit();
        assert!(state.is_quitting());
        // A second request changes nothing
        state.request_quit();
        assert!(state.is_quitting());
    }
}
