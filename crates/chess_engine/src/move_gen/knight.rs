//! Knight movement rule
//!
//! ## Knight Movement Rules
//!
//! - Knights move in an L-shape: (±1, ±2) or (±2, ±1)
//! - Knights jump; intervening pieces never block them
//! - 8 possible destinations from central squares, fewer near edges

use super::sliding::deltas;
use crate::types::Square;

/// Knight jump offsets as (file, rank) deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Fixed L-shaped offset, never blocked.
pub fn is_valid_knight_move(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    let (df, dr) = (df.abs(), dr.abs());
    (df == 1 && dr == 2) || (df == 2 && dr == 1)
}
