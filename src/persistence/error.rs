//! Error types for persistence sinks

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// SQLite store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// XML log file I/O error
    #[error("Move log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML log exists but is not a `<FENNotations>` document
    #[error("Malformed move log {path:?}: {reason}")]
    MalformedLog { path: PathBuf, reason: String },
}

/// Result type alias for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
