//! Sliding piece helpers
//!
//! Common functionality for sliding pieces (bishops, rooks, queens). A slide
//! is legal when origin and destination share a line of the right kind and
//! every square strictly between them is empty.
//!
//! ## Algorithm
//!
//! The step direction is the sign of the file and rank deltas. Starting one
//! step past the origin we walk towards the destination and stop at the first
//! occupied square. The destination itself is not inspected here; whether it
//! holds an enemy (capture) or a friendly piece (illegal) is decided by the
//! caller.

use crate::board::Position;
use crate::types::Square;

/// File and rank deltas from `from` to `to`.
#[inline]
pub(crate) fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

#[inline]
pub(crate) fn is_orthogonal(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    (df == 0) != (dr == 0)
}

#[inline]
pub(crate) fn is_diagonal(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    df != 0 && df.abs() == dr.abs()
}

/// Check that every square strictly between `from` and `to` is empty
///
/// Only meaningful when the two squares share a rank, file or diagonal.
///
/// # Examples
///
/// ```rust,ignore
/// // a1 -> a8 on the starting position is blocked by the a2 pawn
/// assert!(!is_path_clear(&Position::starting(), a1, a8));
/// ```
pub fn is_path_clear(position: &Position, from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    let step = (df.signum(), dr.signum());

    let mut current = from;
    loop {
        current = match current.offset(step.0, step.1) {
            Some(next) => next,
            None => return false,
        };
        if current == to {
            return true;
        }
        if !position.is_empty(current) {
            return false;
        }
    }
}
