//! Error types for core module
//!
//! Provides custom error types for core functionality: settings persistence
//! and command-line / settings value parsing.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Clock preset that is neither a named preset nor `N` / `N+inc`
    #[error("Invalid clock mode {value:?} (try untimed, 5min, 10min, 10min_increment, 15 or 3+2)")]
    InvalidClockMode { value: String },

    /// Color name other than white / black
    #[error("Invalid color {value:?} (expected white or black)")]
    InvalidColor { value: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
