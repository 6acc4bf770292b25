//! Queen movement rule
//!
//! Queens combine the movement patterns of bishops and rooks.

use super::bishop;
use super::rook;
use crate::board::Position;
use crate::types::Square;

/// Rook or bishop pattern.
pub fn is_valid_queen_move(position: &Position, from: Square, to: Square) -> bool {
    rook::is_valid_rook_move(position, from, to) || bishop::is_valid_bishop_move(position, from, to)
}
