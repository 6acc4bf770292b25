//! Error types for networking

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer closed the connection
    #[error("Connection closed by peer")]
    ConnectionClosed,
}

/// Result type alias for networking operations
pub type NetworkResult<T> = Result<T, NetworkError>;
