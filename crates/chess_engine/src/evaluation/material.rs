//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use crate::board::Position;
use crate::constants::piece_value;
use crate::types::Color;

/// Material balance, White's pieces minus Black's, in centipawns
pub fn evaluate_material(position: &Position) -> i32 {
    position
        .squares
        .iter()
        .flatten()
        .map(|piece| match piece.color {
            Color::White => piece_value(piece.kind),
            Color::Black => -piece_value(piece.kind),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE};

    #[test]
    fn test_starting_position_is_balanced() {
        assert_eq!(evaluate_material(&Position::starting()), 0);
    }

    #[test]
    fn test_missing_black_queen_favours_white() {
        let position =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(evaluate_material(&position), QUEEN_VALUE);
    }

    #[test]
    fn test_kings_count_for_nothing() {
        let position = Position::from_fen("4k3/8/8/8/8/8/P7/R3K3 w - - 0 1").unwrap();
        assert_eq!(evaluate_material(&position), ROOK_VALUE + PAWN_VALUE);
    }
}
