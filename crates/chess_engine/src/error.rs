//! Error types for chess engine
//!
//! Provides the error taxonomy for rules-engine operations: position parsing,
//! move validation and notation parsing. Every error here is local and
//! recoverable; the authoritative position is never modified when one is
//! returned.

use thiserror::Error;

use crate::types::{Color, Move, Square};

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// FEN text could not be parsed into a valid position
    #[error("Malformed position: {reason}")]
    MalformedPosition { reason: String },

    /// Move fails the piece pattern, blocking or self-check rules
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: String },

    /// Pawn reaches the farthest rank but no promotion piece was chosen
    #[error("Move {mv} needs a promotion piece (q, r, b or n)")]
    PromotionRequired { mv: Move },

    /// No piece at source square
    #[error("No piece at source square {square}")]
    NoPieceAtSquare { square: Square },

    /// Piece does not belong to the side to move
    #[error("Piece at square {square} does not belong to {color}")]
    WrongPieceColor { square: Square, color: Color },

    /// Square text outside a1..h8
    #[error("Invalid square: {square:?}")]
    InvalidSquare { square: String },

    /// Coordinate move text that is not `e2e4` / `e7e8q`
    #[error("Invalid move notation: {notation:?}")]
    InvalidMoveNotation { notation: String },
}

impl ChessEngineError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ChessEngineError::MalformedPosition {
            reason: reason.into(),
        }
    }

    pub(crate) fn illegal(mv: Move, reason: impl Into<String>) -> Self {
        ChessEngineError::IllegalMove {
            mv,
            reason: reason.into(),
        }
    }
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
