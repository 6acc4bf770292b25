//! Pawn movement rules
//!
//! ## Pawn Movement Rules
//!
//! - One square forward onto an empty square
//! - Two squares forward from the starting rank when both squares are empty
//! - One square diagonally forward onto an enemy piece
//! - One square diagonally forward onto the en-passant target
//!
//! Forward is rank +1 for White and rank -1 for Black. Promotion is not a
//! geometric concern and is handled when the move is applied.

use super::sliding::deltas;
use crate::board::Position;
use crate::types::{Color, Square};

/// Pseudo-legal pawn move for a pawn of `color` standing on `from`.
pub fn is_valid_pawn_move(position: &Position, from: Square, to: Square, color: Color) -> bool {
    let (df, dr) = deltas(from, to);
    let dir = color.pawn_direction();

    if df == 0 {
        if dr == dir {
            return position.is_empty(to);
        }
        if dr == 2 * dir && from.rank() == color.pawn_start_rank() {
            let Some(middle) = from.offset(0, dir) else {
                return false;
            };
            return position.is_empty(middle) && position.is_empty(to);
        }
        return false;
    }

    if df.abs() == 1 && dr == dir {
        return match position.color_at(to) {
            Some(target) => target != color,
            None => position.en_passant == Some(to),
        };
    }

    false
}

/// Squares a pawn of `color` on `from` attacks, regardless of occupancy.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let dir = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |df| from.offset(df, dir))
}

/// True when the move is a diagonal pawn step onto an empty en-passant target.
pub fn is_en_passant_capture(position: &Position, from: Square, to: Square) -> bool {
    let (df, _) = deltas(from, to);
    df != 0 && position.is_empty(to) && position.en_passant == Some(to)
}
