//! Position-sync wire protocol
//!
//! Messages are UTF-8 strings with no length prefix or delimiter; each read
//! of up to [`READ_BUFFER_SIZE`] bytes is one message. A message is either a
//! FEN position or a free-text notice.
//!
//! # Flow
//!
//! ```text
//! peer ──FEN proposal──▶ host      host validates, applies, replies with a Notice
//! host ──FEN──────────▶ peer      after every applied ply
//! host ──Notice───────▶ peer      when the game ends
//! ```

use std::fmt;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::error::{NetworkError, NetworkResult};
use crate::game::GameError;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 65432;

/// Largest message read in one go.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Word the peer CLI treats as "disconnect".
pub const EXIT_COMMAND: &str = "exit";

/// Reply from the host to a proposal, or an unsolicited announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Proposal accepted and played as `mv`
    Accepted { mv: String },
    /// Proposal unparsable or not one legal move away
    InvalidPosition { reason: String },
    /// It is not White's move on the host
    WrongSide { reason: String },
    /// Game already over
    GameOver { announcement: String },
    /// Move rejected for another reason
    Rejected { reason: String },
}

impl Notice {
    /// Map a coordinator error onto the notice sent to the peer.
    pub fn from_error(error: &GameError) -> Self {
        match error {
            GameError::InvalidRemotePosition { reason } => Notice::InvalidPosition {
                reason: reason.clone(),
            },
            GameError::NotYourTurn { .. } => Notice::WrongSide {
                reason: error.to_string(),
            },
            GameError::GameOver { announcement } => Notice::GameOver {
                announcement: announcement.clone(),
            },
            other => Notice::Rejected {
                reason: other.to_string(),
            },
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Accepted { mv } => write!(f, "FEN received: move {mv} accepted"),
            Notice::InvalidPosition { reason } => write!(f, "Invalid FEN: {reason}"),
            Notice::WrongSide { reason } => write!(f, "Wrong side attempted to move: {reason}"),
            Notice::GameOver { announcement } => write!(f, "Game over: {announcement}"),
            Notice::Rejected { reason } => write!(f, "Move rejected: {reason}"),
        }
    }
}

/// Read one message; `Ok(None)` when the peer closed the stream
///
/// Surrounding whitespace, including a trailing newline from line-based
/// peers, is trimmed. Invalid UTF-8 is replaced rather than rejected.
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> NetworkResult<Option<String>> {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let n = reader.read(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf[..n]).trim().to_string()))
}

/// Write one message and flush it.
pub async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &str) -> NetworkResult<()> {
    if message.len() > READ_BUFFER_SIZE {
        return Err(NetworkError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("message of {} bytes exceeds {} bytes", message.len(), READ_BUFFER_SIZE),
        )));
    }
    writer.write_all(message.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
