//! # Chess Engine Constants
//!
//! Piece values (in centipawns), the standard starting position and search
//! defaults.
//!
//! ## Centipawn Valuation
//!
//! The search maximises White's material minus Black's material, so only
//! material values matter here:
//!
//! | Piece  | Value |
//! |--------|-------|
//! | Pawn   | 100   |
//! | Knight | 300   |
//! | Bishop | 300   |
//! | Rook   | 500   |
//! | Queen  | 900   |
//! | King   | 0     |
//!
//! The king is never captured in a legal game, so it contributes nothing to the
//! balance.

use crate::types::PieceKind;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 0;

/// Material value of a piece kind.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Default look-ahead of the AI, in plies.
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Window bound for alpha-beta; larger than any reachable material balance.
pub const AB_INF: i32 = 1_000_000;

/// Shown when the last move cannot be reconstructed from the move log.
pub const UNKNOWN_MOVE: &str = "Unknown Move";
