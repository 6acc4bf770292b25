//! Position evaluation
//!
//! The engine scores positions by material only: White's piece values minus
//! Black's. [`evaluate_for_side`] flips the sign for the negamax search.
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation

mod material;

pub use material::evaluate_material;

use crate::board::Position;

/// Material balance from the point of view of the side to move.
#[inline]
pub fn evaluate_for_side(position: &Position) -> i32 {
    position.side_to_move.sign() * evaluate_material(position)
}
