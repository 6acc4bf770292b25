//! Pseudo-legal move rules
//!
//! Decides whether a single `from -> to` move fits the movement pattern of
//! the piece on `from`, ignoring whether it leaves the mover's own king in
//! check. Self-check filtering lives in [`crate::api`].
//!
//! ## Module Organization
//!
//! - `pawn` - pushes, double steps, diagonal captures, en passant
//! - `knight` - L-shaped jumps
//! - `bishop`, `rook`, `queen` - sliding pieces on top of `sliding`
//! - `king` - single steps and castling
//! - `attack` - square attack and check detection

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;

pub use attack::{is_in_check, is_square_attacked};
pub use king::{castle_rook_squares, castle_side, CastleSide};
pub use pawn::is_en_passant_capture;

use crate::board::Position;
use crate::types::{PieceKind, Square};

/// Check a move against the movement pattern of the piece on `from`
///
/// Returns `false` when `from` is empty, `from == to`, or the destination
/// holds a piece of the mover's own color. The side to move is not checked.
///
/// # Examples
///
/// ```rust,ignore
/// let position = Position::starting();
/// assert!(is_pseudo_legal(&position, e2, e4));
/// assert!(!is_pseudo_legal(&position, e2, e5));
/// ```
pub fn is_pseudo_legal(position: &Position, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    if position.color_at(to) == Some(piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn::is_valid_pawn_move(position, from, to, piece.color),
        PieceKind::Knight => knight::is_valid_knight_move(from, to),
        PieceKind::Bishop => bishop::is_valid_bishop_move(position, from, to),
        PieceKind::Rook => rook::is_valid_rook_move(position, from, to),
        PieceKind::Queen => queen::is_valid_queen_move(position, from, to),
        PieceKind::King => king::is_valid_king_move(position, from, to, piece.color),
    }
}

/// All squares the piece on `from` could move to, before self-check filtering.
pub fn pseudo_destinations(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_pseudo_legal(position, from, to))
        .collect()
}
