//! Unified error types for plist-diff.
//!
//! Decode failures are deliberately absent from [`PlistDiffError`]: they are
//! absorbed into [`Value::Absent`](crate::model::Value::Absent) by the
//! file-set differ and never abort a comparison. Everything here is fatal for
//! the operation that produced it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plist-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlistDiffError {
    /// The root of a tree could not be statted or walked
    #[error("cannot access tree {}: {source}", path.display())]
    TreeAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read because of its permissions
    #[error("permission denied reading {path}")]
    Permission { path: String },

    /// Any other IO error, with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<String>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Watch mode errors
    #[error(transparent)]
    Watch(#[from] crate::watch::WatchError),

    /// Report rendering errors
    #[error(transparent)]
    Report(#[from] crate::reports::ReportError),
}

/// Convenient Result type for plist-diff operations
pub type Result<T> = std::result::Result<T, PlistDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PlistDiffError {
    /// Create a tree access error for the given root
    pub fn tree_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TreeAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a permission error for a file inside a tree
    pub fn permission(path: impl Into<String>) -> Self {
        Self::Permission { path: path.into() }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error is a permission failure on a single file.
    #[must_use]
    pub const fn is_permission(&self) -> bool {
        matches!(self, Self::Permission { .. })
    }
}

impl From<std::io::Error> for PlistDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing message, so a
/// chain of calls produces `outer: middle: inner`.
///
/// ```ignore
/// use plist_diff::error::ErrorContext;
///
/// let snapshot = Snapshot::capture(&tree, true)
///     .with_context(|| format!("snapshotting {}", root.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PlistDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Variants whose message is derived from structured fields (tree access,
/// permission, watch) are passed through untouched.
fn add_context_to_error(err: PlistDiffError, new_ctx: &str) -> PlistDiffError {
    match err {
        PlistDiffError::Io {
            path,
            message,
            source,
        } => PlistDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PlistDiffError::Config(msg) => PlistDiffError::Config(chain_context(new_ctx, &msg)),
        other => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = PlistDiffError::permission("Library/com.apple.dock.plist");
        assert_eq!(
            err.to_string(),
            "permission denied reading Library/com.apple.dock.plist"
        );
        assert!(err.is_permission());

        let err = PlistDiffError::tree_access(
            "/does/not/exist",
            IoError::new(ErrorKind::NotFound, "No such file or directory"),
        );
        assert!(err.to_string().contains("/does/not/exist"));
        assert!(!err.is_permission());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = PlistDiffError::io("a/b.plist", IoError::other("disk on fire"));
        match err {
            PlistDiffError::Io { path, message, .. } => {
                assert_eq!(path.as_deref(), Some("a/b.plist"));
                assert_eq!(message, "disk on fire");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(PlistDiffError::config("base"))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(PlistDiffError::Config(msg)) => {
                assert_eq!(msg, "outer layer: middle layer: base");
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_passes_permission_through() {
        let res: Result<()> = Err(PlistDiffError::permission("x.plist"));
        match res.context("reading tree") {
            Err(PlistDiffError::Permission { path }) => assert_eq!(path, "x.plist"),
            other => panic!("Expected Permission error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: std::result::Result<i32, IoError> = Err(IoError::other("boom"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
