//! Game state queries
//!
//! Checkmate / stalemate detection and recovery of the move that connects
//! two consecutive positions.

use tracing::debug;

use super::moves::{has_legal_move, legal_moves, play_unchecked};
use crate::board::Position;
use crate::move_gen::is_in_check;
use crate::types::{GameStatus, Move};

/// Get current game state for the side to move
///
/// No legal move while in check is checkmate, no legal move otherwise is
/// stalemate. Exhaustive over every piece and square; call once per applied
/// move rather than continuously.
pub fn game_status(position: &Position) -> GameStatus {
    if has_legal_move(position) {
        return GameStatus::Ongoing;
    }
    let side = position.side_to_move;
    if is_in_check(position, side) {
        GameStatus::Checkmate {
            winner: side.opposite(),
        }
    } else {
        GameStatus::Stalemate
    }
}

#[inline]
pub fn is_checkmate(position: &Position) -> bool {
    matches!(game_status(position), GameStatus::Checkmate { .. })
}

#[inline]
pub fn is_stalemate(position: &Position) -> bool {
    game_status(position) == GameStatus::Stalemate
}

/// Find the legal move that turns `prev` into `next`
///
/// Compares placement and side to move only. Returns `None` when no single
/// legal move explains the transition, e.g. after a manual position load.
///
/// # Examples
///
/// ```rust,ignore
/// let after = apply_move(&start, "g1f3".parse()?)?;
/// assert_eq!(infer_move(&start, &after).map(|m| m.to_string()), Some("g1f3".into()));
/// ```
pub fn infer_move(prev: &Position, next: &Position) -> Option<Move> {
    let found = legal_moves(prev)
        .into_iter()
        .find(|&mv| play_unchecked(prev, mv).same_placement(next));
    if found.is_none() {
        debug!("No legal move connects the two positions");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::apply_move;
    use crate::types::Color;

    fn play(moves: &[&str]) -> Position {
        moves.iter().fold(Position::starting(), |position, text| {
            apply_move(&position, text.parse().unwrap()).unwrap()
        })
    }

    #[test]
    fn test_fools_mate_is_checkmate_for_black() {
        let position = play(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(
            game_status(&position),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(is_checkmate(&position));
        assert!(!is_stalemate(&position));
    }

    #[test]
    fn test_stalemate_is_not_checkmate() {
        // Black king a8 boxed in by queen c7, not in check
        let position = Position::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game_status(&position), GameStatus::Stalemate);
    }

    #[test]
    fn test_starting_position_is_ongoing() {
        assert_eq!(game_status(&Position::starting()), GameStatus::Ongoing);
    }

    #[test]
    fn test_infer_move_recovers_played_move() {
        let start = Position::starting();
        let after = play(&["g1f3"]);
        assert_eq!(infer_move(&start, &after), Some("g1f3".parse().unwrap()));
    }

    #[test]
    fn test_infer_move_recovers_promotion_piece() {
        let before = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let after = apply_move(&before, "e7e8r".parse().unwrap()).unwrap();
        assert_eq!(infer_move(&before, &after), Some("e7e8r".parse().unwrap()));
    }

    #[test]
    fn test_infer_move_unknown_for_unrelated_positions() {
        let start = Position::starting();
        let far = play(&["e2e4", "e7e5"]);
        assert_eq!(infer_move(&start, &far), None);
    }
}
