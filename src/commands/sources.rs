//! Screen-share source selection.
//!
//! When the hosted page asks for display capture, the shell enumerates
//! capturable screens and windows, presents them as a native popup menu on
//! the main window, and resolves the request with the user's choice. Every
//! failure path (zero sources, a torn-down window, enumeration errors, a
//! superseding request) resolves to `None`, which the page treats as a
//! cancelled share, never as a crash.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tauri::menu::{Menu, MenuEvent, MenuItem};
use tauri::{AppHandle, Manager, State, Wry};
use tokio::sync::oneshot;
use xcap::{Monitor, Window};

use crate::app::window::MAIN_WINDOW_LABEL;
use crate::error::{DeClientError, DeClientResult, LockResultExt};

/// Menu ids for picker entries are namespaced so tray menu events never
/// collide with them.
const SELECTION_ID_PREFIX: &str = "share-source:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Screen,
    Window,
}

/// One capturable screen or window, as offered to the user and to the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSource {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
}

/// At most one share selection is in flight; a newer request supersedes the
/// older one by dropping its responder.
struct PendingSelection {
    sources: Vec<CaptureSource>,
    responder: oneshot::Sender<Option<CaptureSource>>,
}

#[derive(Default)]
pub struct SharePicker {
    pending: Mutex<Option<PendingSelection>>,
}

/// Enumerate capturable screens and windows.
///
/// Monitors are mandatory; a window-enumeration failure degrades to a
/// screens-only list rather than failing the whole request.
pub fn enumerate_sources() -> DeClientResult<Vec<CaptureSource>> {
    let mut sources = Vec::new();

    let monitors = Monitor::all()
        .map_err(|e| DeClientError::SourceError(format!("monitor enumeration failed: {e}")))?;
    for monitor in &monitors {
        let id = monitor.id().unwrap_or_default();
        let name = monitor
            .name()
            .unwrap_or_else(|_| format!("Screen {id}"));
        sources.push(CaptureSource {
            id: format!("screen:{id}"),
            name,
            kind: SourceKind::Screen,
        });
    }

    match Window::all() {
        Ok(windows) => {
            for window in &windows {
                if !is_shareable(
                    &window.title().unwrap_or_default(),
                    window.is_minimized().unwrap_or(true),
                    window.width().unwrap_or(0),
                    window.height().unwrap_or(0),
                ) {
                    continue;
                }
                let id = window.id().unwrap_or_default();
                sources.push(CaptureSource {
                    id: format!("window:{id}"),
                    name: window.title().unwrap_or_default(),
                    kind: SourceKind::Window,
                });
            }
        }
        Err(e) => log::warn!("Window enumeration failed, offering screens only: {e}"),
    }

    Ok(sources)
}

/// Whether a window is worth offering as a share source. Minimized,
/// untitled, and tiny (popup/tooltip-sized) windows are skipped.
fn is_shareable(title: &str, minimized: bool, width: u32, height: u32) -> bool {
    !minimized && !title.is_empty() && width >= 50 && height >= 50
}

fn selection_id(index: usize) -> String {
    format!("{SELECTION_ID_PREFIX}{index}")
}

fn parse_selection_id(id: &str) -> Option<usize> {
    id.strip_prefix(SELECTION_ID_PREFIX)?.parse().ok()
}

fn build_source_menu(app: &AppHandle, sources: &[CaptureSource]) -> DeClientResult<Menu<Wry>> {
    let menu = Menu::new(app)?;
    for (index, source) in sources.iter().enumerate() {
        let item = MenuItem::with_id(app, selection_id(index), &source.name, true, None::<&str>)?;
        menu.append(&item)?;
    }
    Ok(menu)
}

/// Present the share picker and wait for the user's choice.
///
/// Invoked by the hosted page (via the `getDisplayMedia` hook). `None` is
/// the cancellation result; the caller must never receive an invalid source.
#[tauri::command]
pub async fn select_share_source(
    app: AppHandle,
    picker: State<'_, SharePicker>,
) -> DeClientResult<Option<CaptureSource>> {
    let sources = match enumerate_sources() {
        Ok(sources) => sources,
        Err(e) => {
            log::warn!("Share source enumeration failed: {e}");
            return Ok(None);
        }
    };
    if sources.is_empty() {
        log::info!("No shareable sources available");
        return Ok(None);
    }

    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("Share request ignored, main window is gone");
        return Ok(None);
    };

    let menu = build_source_menu(&app, &sources)?;
    log::info!("Presenting {} share sources", sources.len());

    let (tx, rx) = oneshot::channel();
    {
        let mut pending = picker.pending.lock().map_lock_err("share picker")?;
        // Dropping a previous responder cancels that request
        *pending = Some(PendingSelection {
            sources,
            responder: tx,
        });
    }

    window.popup_menu(&menu)?;

    match rx.await {
        Ok(choice) => Ok(choice),
        Err(_) => {
            log::debug!("Share selection superseded by a newer request");
            Ok(None)
        }
    }
}

/// Route picker menu events back to the pending selection.
///
/// Registered on the builder's `on_menu_event` hook; ids outside the picker
/// namespace fall through untouched.
pub fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    let Some(index) = parse_selection_id(event.id.as_ref()) else {
        return;
    };

    let picker = app.state::<SharePicker>();
    let pending = match picker.pending.lock() {
        Ok(mut guard) => guard.take(),
        Err(e) => {
            log::error!("Share picker lock poisoned: {e}");
            return;
        }
    };
    let Some(pending) = pending else {
        log::warn!("Share selection event with no pending request");
        return;
    };

    let choice = match pending.sources.get(index) {
        Some(source) => {
            log::info!("Selected share source: {}", source.name);
            Some(source.clone())
        }
        None => {
            log::warn!("Share selection index {index} out of range");
            None
        }
    };
    // The receiver may be gone if the command was superseded; nothing to do
    let _ = pending.responder.send(choice);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(kind: SourceKind, id: &str, name: &str) -> CaptureSource {
        CaptureSource {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    #[test]
    fn selection_ids_round_trip() {
        for index in [0usize, 1, 7, 250] {
            assert_eq!(parse_selection_id(&selection_id(index)), Some(index));
        }
    }

    #[test]
    fn foreign_menu_ids_are_ignored() {
        assert_eq!(parse_selection_id("show"), None);
        assert_eq!(parse_selection_id("quit"), None);
        assert_eq!(parse_selection_id("share-source:"), None);
        assert_eq!(parse_selection_id("share-source:abc"), None);
    }

    #[test]
    fn shareable_filter_skips_minimized_untitled_and_tiny() {
        assert!(is_shareable("Danny DeDisco", false, 800, 600));
        assert!(!is_shareable("Danny DeDisco", true, 800, 600));
        assert!(!is_shareable("", false, 800, 600));
        assert!(!is_shareable("Tooltip", false, 20, 20));
    }

    #[test]
    fn capture_source_serializes_with_lowercase_kind() {
        let json = serde_json::to_string(&source(SourceKind::Screen, "screen:1", "Screen 1"))
            .unwrap();
        assert!(json.contains(r#""kind":"screen""#));

        let json = serde_json::to_string(&source(SourceKind::Window, "window:42", "Chat")).unwrap();
        assert!(json.contains(r#""kind":"window""#));
    }

    #[test]
    fn superseded_request_resolves_as_cancellation() {
        // Dropping the responder is how a newer request cancels an older one
        let (tx, rx) = oneshot::channel::<Option<CaptureSource>>();
        drop(tx);
        assert!(rx.blocking_recv().is_err());
    }
}
