//! Update checks against the release feed.
//!
//! Packaged builds consult the updater endpoint on startup (silently) and on
//! demand from the tray (interactively). Development builds never touch the
//! network path: the manual check shows a dev-mode notice instead. Finding
//! an update always prompts restart-and-install or defer.

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::error::DeClientResult;

pub(crate) const DEV_MODE_MESSAGE: &str =
    "Cannot check for updates in development mode.\n\nPackage the application first.";

/// What a check request turns into, decided purely by the build flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateCheckPlan {
    /// Unpackaged build: notify interactively, otherwise skip silently.
    DevModeNotice,
    /// Packaged build: query the feed.
    QueryFeed,
}

pub(crate) fn plan_update_check(packaged: bool) -> UpdateCheckPlan {
    if packaged {
        UpdateCheckPlan::QueryFeed
    } else {
        UpdateCheckPlan::DevModeNotice
    }
}

fn is_packaged() -> bool {
    !cfg!(debug_assertions)
}

/// Check the feed for a newer version.
///
/// `interactive` controls whether negative outcomes (dev mode, up to date,
/// feed unreachable) get a dialog; a found update always prompts.
pub async fn run_update_check(app: AppHandle, interactive: bool) -> DeClientResult<()> {
    match plan_update_check(is_packaged()) {
        UpdateCheckPlan::DevModeNotice => {
            if interactive {
                app.dialog()
                    .message(DEV_MODE_MESSAGE)
                    .title("Update Check")
                    .kind(MessageDialogKind::Info)
                    .show(|_| {});
            } else {
                log::info!("Skipping startup update check in development build");
            }
            Ok(())
        }
        UpdateCheckPlan::QueryFeed => {
            let updater = app.updater()?;
            match updater.check().await {
                Ok(Some(update)) => {
                    log::info!(
                        "Update {} available (running {})",
                        update.version,
                        app.package_info().version
                    );
                    prompt_restart(app.clone(), update);
                    Ok(())
                }
                Ok(None) => {
                    log::info!("No update available");
                    if interactive {
                        app.dialog()
                            .message("You are running the latest version.")
                            .title("Update Check")
                            .kind(MessageDialogKind::Info)
                            .show(|_| {});
                    }
                    Ok(())
                }
                Err(e) => {
                    // The user re-triggers manually; no automatic retry
                    log::error!("Update check failed: {e}");
                    if interactive {
                        app.dialog()
                            .message("Could not reach the update server. Try again later.")
                            .title("Update Check")
                            .kind(MessageDialogKind::Warning)
                            .show(|_| {});
                    }
                    Ok(())
                }
            }
        }
    }
}

/// Ask the user to restart-and-install or defer, then act on the answer.
///
/// The download runs off the dialog callback; the window may be hidden or
/// even quit by the time it finishes, which is fine since install-and-restart
/// never touches the window.
fn prompt_restart(app: AppHandle, update: Update) {
    let version = update.version.clone();
    app.dialog()
        .message(format!(
            "Danny DeClient {version} is available. Restart the application to download and apply the update."
        ))
        .title("Application Update")
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom(
            "Restart".to_string(),
            "Later".to_string(),
        ))
        .show(move |restart| {
            if !restart {
                log::info!("Update {version} deferred");
                return;
            }
            tauri::async_runtime::spawn(async move {
                match update.download_and_install(|_, _| {}, || {}).await {
                    Ok(()) => {
                        log::info!("Update {version} installed, restarting");
                        app.restart();
                    }
                    Err(e) => {
                        log::error!("Failed to install update {version}: {e}");
                        app.dialog()
                            .message("The update could not be installed. Try again later.")
                            .title("Application Update")
                            .kind(MessageDialogKind::Warning)
                            .show(|_| {});
                    }
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpackaged_builds_never_plan_a_feed_query() {
        assert_eq!(plan_update_check(false), UpdateCheckPlan::DevModeNotice);
    }

    #[test]
    fn packaged_builds_query_the_feed() {
        assert_eq!(plan_update_check(true), UpdateCheckPlan::QueryFeed);
    }

    #[test]
    fn dev_mode_notice_explains_itself() {
        assert!(DEV_MODE_MESSAGE.contains("development mode"));
    }
}
