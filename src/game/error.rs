//! Error types for game module
//!
//! Errors raised by the turn coordinator and the clock. Engine errors are
//! wrapped unchanged so callers can still match on them.

use chess_engine::{ChessEngineError, Color};

use super::coordinator::MoveStamp;

/// Errors that can occur in game coordination
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Rules engine rejected the move or position
    #[error(transparent)]
    Engine(#[from] ChessEngineError),

    /// Game already finished; no further moves or clock changes
    #[error("Game is over: {announcement}")]
    GameOver { announcement: String },

    /// A human tried to move for the side played by the engine
    #[error("Not your turn: {color} is played by the engine")]
    NotYourTurn { color: Color },

    /// Move was computed against a position that has since changed
    #[error("Stale move: computed at {expected}, game is at {actual}")]
    StaleMove { expected: MoveStamp, actual: MoveStamp },

    /// Network peer sent an unparsable or illegally sequenced position
    #[error("Invalid remote position: {reason}")]
    InvalidRemotePosition { reason: String },

    /// Clock ran out while the move was pending
    #[error("{loser} ran out of time")]
    ClockExpired { loser: Color },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
