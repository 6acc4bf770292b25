//! Bishop movement rule
//!
//! ## Bishop Movement Rules
//!
//! - Bishops move diagonally any number of squares
//! - Cannot jump over pieces
//! - Always stay on squares of the same color

use super::sliding;
use crate::board::Position;
use crate::types::Square;

/// Diagonal slide with a clear path.
pub fn is_valid_bishop_move(position: &Position, from: Square, to: Square) -> bool {
    sliding::is_diagonal(from, to) && sliding::is_path_clear(position, from, to)
}
