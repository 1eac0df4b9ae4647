//! Central error types for the DeClient shell.
//!
//! This module provides typed errors for better error handling across the codebase.
//! All errors implement `Serialize` for Tauri IPC compatibility.

use serde::Serialize;
use thiserror::Error;

/// Main error type for shell operations.
#[derive(Error, Debug)]
pub enum DeClientError {
    /// Main window creation or manipulation failed
    #[error("Window error: {0}")]
    WindowError(String),

    /// Global shortcut registration failed
    #[error("Shortcut error: {0}")]
    ShortcutError(String),

    /// System tray setup or menu handling failed
    #[error("Tray error: {0}")]
    TrayError(String),

    /// Screen-share source enumeration failed
    #[error("Source enumeration error: {0}")]
    SourceError(String),

    /// Update check or install failed
    #[error("Update error: {0}")]
    UpdateError(#[from] tauri_plugin_updater::Error),

    /// Generic tauri runtime error
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    /// Lock poisoned (mutex)
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Implement Serialize for Tauri IPC compatibility.
/// Tauri requires errors to be serializable to send to the frontend.
impl Serialize for DeClientError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as the error message string
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for DeClientError {
    fn from(msg: String) -> Self {
        DeClientError::Other(msg)
    }
}

impl From<&str> for DeClientError {
    fn from(msg: &str) -> Self {
        DeClientError::Other(msg.to_string())
    }
}

/// Helper trait for converting mutex lock errors to DeClientError.
pub trait LockResultExt<T> {
    /// Convert a poisoned lock error to DeClientError with context.
    fn map_lock_err(self, context: &str) -> Result<T, DeClientError>;
}

impl<T> LockResultExt<T> for Result<T, std::sync::PoisonError<T>> {
    fn map_lock_err(self, context: &str) -> Result<T, DeClientError> {
        self.map_err(|_| DeClientError::LockPoisoned {
            context: context.to_string(),
        })
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error, converting it to DeClientError::Other.
    fn context(self, msg: &str) -> DeClientResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> DeClientResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> DeClientResult<T> {
        self.map_err(|e| DeClientError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> DeClientResult<T> {
        self.map_err(|e| DeClientError::Other(format!("{}: {}", f(), e)))
    }
}

/// Type alias for Results using DeClientError.
pub type DeClientResult<T> = Result<T, DeClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeClientError::WindowError("test".to_string());
        assert_eq!(err.to_string(), "Window error: test");
    }

    #[test]
    fn test_error_serialization() {
        let err = DeClientError::TrayError("menu build failed".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("menu build failed"));
    }

    #[test]
    fn test_from_string() {
        let err: DeClientError = "test error".into();
        assert!(matches!(err, DeClientError::Other(_)));
    }

    #[test]
    fn test_lock_poisoning_recovery() {
        use std::sync::Mutex;

        let mutex = Mutex::new(42);

        // Poison the mutex by panicking while holding the lock
        let _ = std::panic::catch_unwind(|| {
            let _guard = mutex.lock().unwrap();
            panic!("intentional panic to poison mutex");
        });

        assert!(mutex.lock().is_err());

        let result = mutex.lock().map_lock_err("share_picker");
        assert!(matches!(result, Err(DeClientError::LockPoisoned { .. })));

        if let Err(DeClientError::LockPoisoned { context }) = result {
            assert_eq!(context, "share_picker");
        }
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<(), &str> = Err("original error");
        let with_context = result.context("operation failed");

        assert!(matches!(with_context, Err(DeClientError::Other(_))));
        let msg = with_context.unwrap_err().to_string();
        assert!(msg.contains("operation failed"));
        assert!(msg.contains("original error"));
    }

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<(), &str> = Err("inner");
        let with_context = result.with_context(|| format!("source {}", 3));

        let msg = with_context.unwrap_err().to_string();
        assert!(msg.contains("source 3"));
        assert!(msg.contains("inner"));
    }

    #[test]
    fn test_result_ext_ok_passthrough() {
        let result: Result<i32, &str> = Ok(42);
        let with_context = result.context("should not appear");

        assert_eq!(with_context.unwrap(), 42);
    }
}
