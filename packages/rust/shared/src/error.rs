//! Error types for Docweave.
//!
//! Library crates use [`DocweaveError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Docweave operations.
#[derive(Debug, thiserror::Error)]
pub enum DocweaveError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A required file (template, content store, artifact) is absent.
    ///
    /// Fatal for the document being assembled, never for the batch as a
    /// whole: the driver records it and continues with the next document.
    #[error("missing resource: {path}")]
    MissingResource { path: PathBuf },

    /// Content store read/write error.
    #[error("store error: {0}")]
    Store(String),

    /// A formatter received an empty or malformed payload.
    #[error("formatting failed for '{key}': {message}")]
    Format { key: String, message: String },

    /// Data validation error (schema mismatch, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocweaveError>;

impl DocweaveError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a formatting error for a fragment key.
    pub fn format_failed(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Format {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Flag a missing template, store, or artifact file.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::MissingResource { path: path.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
