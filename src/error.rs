// Library error type.
//
// Every fallible operation in the core returns `subscout::Result<T>`. The
// binary wraps these in anyhow with extra context; library callers can match
// on the variants (e.g. re-prompt for a style on `StyleNotFound`).

use std::path::PathBuf;

use crate::session::SessionState;

pub type Result<T> = std::result::Result<T, SubscoutError>;

#[derive(Debug, thiserror::Error)]
pub enum SubscoutError {
    /// The file extension is not one of the supported subtitle formats.
    #[error("Unsupported subtitle format: {0:?}")]
    UnsupportedFormat(String),

    /// A styled subtitle was asked for a style it does not declare.
    #[error("Style '{style}' not found. Available styles: {available:?}")]
    StyleNotFound {
        style: String,
        available: Vec<String>,
    },

    /// A styled subtitle was processed without choosing a style.
    #[error("Choose a style to process. Available styles: {available:?}")]
    StyleRequired { available: Vec<String> },

    /// The subtitle bytes are not valid UTF-8 (with or without a BOM).
    #[error("Cannot decode {} as UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("Malformed subtitle at line {line}: {reason}")]
    MalformedSubtitle { line: usize, reason: String },

    /// The operation is not allowed in the session's current state.
    #[error("Cannot {operation} a session that is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("Upload is {size} bytes, maximum is {max} bytes")]
    UploadTooLarge { size: usize, max: usize },

    /// A language resource (word list, segmenter dictionary) could not be loaded.
    #[error("{resource} unavailable at {}: {reason}", path.display())]
    ResourceUnavailable {
        resource: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
