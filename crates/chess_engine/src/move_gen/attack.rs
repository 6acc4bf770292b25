//! Attack detection and check detection
//!
//! Provides functions to check if squares are under attack and if kings are
//! in check. This module is critical for move legality validation.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all pieces of the
//! attacking color and verify if any can capture onto the target square.
//! Only capture patterns count: pawns attack diagonally even when the square
//! is empty, and castling never attacks anything.

use super::{bishop, king, knight, pawn, queen, rook};
use crate::board::Position;
use crate::types::{Color, PieceKind, Square};

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `position` - The position to inspect
/// * `square` - Target square
/// * `by_color` - Color of pieces that might attack
///
/// # Examples
///
/// ```rust,ignore
/// // After 1.e4 the d5 square is attacked by White
/// let attacked = is_square_attacked(&position, "d5".parse()?, Color::White);
/// ```
pub fn is_square_attacked(position: &Position, square: Square, by_color: Color) -> bool {
    position
        .squares_of(by_color)
        .any(|(from, piece)| can_attack(position, from, square, piece.kind, by_color))
}

fn can_attack(position: &Position, from: Square, to: Square, kind: PieceKind, color: Color) -> bool {
    if from == to {
        return false;
    }
    match kind {
        PieceKind::Pawn => pawn::pawn_attacks(from, color).any(|target| target == to),
        PieceKind::Knight => knight::is_valid_knight_move(from, to),
        PieceKind::Bishop => bishop::is_valid_bishop_move(position, from, to),
        PieceKind::Rook => rook::is_valid_rook_move(position, from, to),
        PieceKind::Queen => queen::is_valid_queen_move(position, from, to),
        PieceKind::King => king::is_valid_king_step(from, to),
    }
}

/// Check if the king of `color` is in check
///
/// A board with no king of that color is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king) => is_square_attacked(position, king, color.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_pawn_attacks_diagonals_only() {
        let position = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(is_square_attacked(&position, sq("d3"), Color::White));
        assert!(is_square_attacked(&position, sq("f3"), Color::White));
        assert!(!is_square_attacked(&position, sq("e3"), Color::White));
    }

    #[test]
    fn test_sliders_are_blocked() {
        let position = Position::from_fen("4k3/8/8/8/8/8/4P3/4RK2 w - - 0 1").unwrap();
        assert!(is_square_attacked(&position, sq("e2"), Color::White));
        assert!(!is_square_attacked(&position, sq("e5"), Color::White));
        assert!(is_square_attacked(&position, sq("a1"), Color::White));
    }

    #[test]
    fn test_in_check_detection() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(is_in_check(&position, Color::White));
        assert!(!is_in_check(&position, Color::Black));
        assert!(!is_in_check(&Position::starting(), Color::White));
    }
}
