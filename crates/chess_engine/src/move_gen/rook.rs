//! Rook movement rule
//!
//! ## Rook Movement Rules
//!
//! - Rooks move horizontally (along ranks) or vertically (along files)
//! - Cannot jump over pieces
//! - Can capture opponent pieces on destination squares

use super::sliding;
use crate::board::Position;
use crate::types::Square;

/// Orthogonal slide with a clear path.
pub fn is_valid_rook_move(position: &Position, from: Square, to: Square) -> bool {
    sliding::is_orthogonal(from, to) && sliding::is_path_clear(position, from, to)
}
