//! Move execution and validation
//!
//! Functions for checking move legality and applying moves with all of their
//! side effects: captures, en passant, castling, promotion, castling-right
//! bookkeeping and the move counters.
//!
//! Every function here is pure. [`apply_move`] returns a new [`Position`] and
//! never touches its input, so a rejected move leaves the caller's state
//! exactly as it was.

use crate::board::Position;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::move_gen::*;
use crate::types::*;

/// Check if a move is legal for the side to move
///
/// Validates that:
/// - Source square contains a piece of the side to move
/// - Move is pseudo-legal (piece can move to destination)
/// - Move doesn't leave the mover's king in check
///
/// The promotion choice is not considered; see [`validate_move`].
///
/// # Examples
///
/// ```rust,ignore
/// let position = Position::starting();
/// assert!(is_legal_move(&position, "e2".parse()?, "e4".parse()?));
/// ```
pub fn is_legal_move(position: &Position, from: Square, to: Square) -> bool {
    match position.color_at(from) {
        Some(color) if color == position.side_to_move => {}
        _ => return false,
    }
    if !is_pseudo_legal(position, from, to) {
        return false;
    }
    !leaves_king_in_check(position, from, to)
}

/// Simulate `from -> to` on a scratch copy and test the mover's king.
fn leaves_king_in_check(position: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = position.piece_at(from) else {
        return true;
    };
    let scratch = play_unchecked(position, Move::new(from, to));
    is_in_check(&scratch, piece.color)
}

/// Full validation of a move including the promotion choice
///
/// # Errors
///
/// - [`ChessEngineError::NoPieceAtSquare`] when `from` is empty
/// - [`ChessEngineError::WrongPieceColor`] when the piece belongs to the side not to move
/// - [`ChessEngineError::IllegalMove`] when the piece pattern, blocking or self-check rules fail,
///   or a promotion piece is given where none applies
/// - [`ChessEngineError::PromotionRequired`] when a pawn reaches the last rank without a choice
pub fn validate_move(position: &Position, mv: Move) -> ChessEngineResult<()> {
    let piece = position
        .piece_at(mv.from)
        .ok_or(ChessEngineError::NoPieceAtSquare { square: mv.from })?;

    if piece.color != position.side_to_move {
        return Err(ChessEngineError::WrongPieceColor {
            square: mv.from,
            color: position.side_to_move,
        });
    }

    if !is_pseudo_legal(position, mv.from, mv.to) {
        return Err(ChessEngineError::illegal(
            mv,
            format!("{} cannot move that way", piece.kind.name()),
        ));
    }

    if leaves_king_in_check(position, mv.from, mv.to) {
        return Err(ChessEngineError::illegal(mv, "move leaves the king in check"));
    }

    let reaches_last_rank =
        piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank();
    match (reaches_last_rank, mv.promotion) {
        (true, None) => Err(ChessEngineError::PromotionRequired { mv }),
        (true, Some(kind)) if !kind.is_promotion_target() => Err(ChessEngineError::illegal(
            mv,
            format!("cannot promote to {}", kind.name()),
        )),
        (false, Some(_)) => Err(ChessEngineError::illegal(mv, "promotion only applies to pawns on the last rank")),
        _ => Ok(()),
    }
}

/// Apply a legal move and return the resulting position
///
/// # Errors
///
/// Any error from [`validate_move`]. The input position is never modified.
///
/// # Examples
///
/// ```rust,ignore
/// let after = apply_move(&Position::starting(), "e2e4".parse()?)?;
/// assert_eq!(after.en_passant, Some("e3".parse()?));
/// ```
pub fn apply_move(position: &Position, mv: Move) -> ChessEngineResult<Position> {
    validate_move(position, mv)?;
    Ok(play_unchecked(position, mv))
}

/// Apply a pseudo-legal move without validation
///
/// Handles every special move. A pawn reaching the last rank without a
/// promotion choice stays a pawn; this only happens on scratch copies used
/// for self-check detection.
pub(crate) fn play_unchecked(position: &Position, mv: Move) -> Position {
    let mut next = position.clone();
    let Some(piece) = next.take_piece(mv.from) else {
        return next;
    };
    let color = piece.color;
    let mut is_capture = next.piece_at(mv.to).is_some();

    if piece.kind == PieceKind::Pawn && is_en_passant_capture(position, mv.from, mv.to) {
        // The double-stepped pawn sits beside the origin, on the target's file.
        let victim_square = Square::from_coords(mv.to.file() as i8, mv.from.rank() as i8);
        if let Some(victim_square) = victim_square {
            if next.piece_at(victim_square) == Some(Piece::new(PieceKind::Pawn, color.opposite())) {
                next.set_piece(victim_square, None);
                is_capture = true;
            }
        }
    }

    if piece.kind == PieceKind::King {
        if let Some(side) = castle_side(mv.from, mv.to, color) {
            if let Some((rook_from, rook_to)) = castle_rook_squares(color, side) {
                let rook = next.take_piece(rook_from);
                next.set_piece(rook_to, rook);
            }
        }
        next.castling.revoke_all(color);
    }
    next.castling.revoke_for_corner(mv.from);
    next.castling.revoke_for_corner(mv.to);

    let placed = match mv.promotion {
        Some(kind)
            if piece.kind == PieceKind::Pawn && mv.to.rank() == color.promotion_rank() =>
        {
            Piece::new(kind, color)
        }
        _ => piece,
    };
    next.set_piece(mv.to, Some(placed));

    let rank_delta = mv.to.rank() as i8 - mv.from.rank() as i8;
    next.en_passant = if piece.kind == PieceKind::Pawn && rank_delta.abs() == 2 {
        mv.from.offset(0, color.pawn_direction())
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if color == Color::Black {
        next.fullmove_number += 1;
    }
    next.side_to_move = color.opposite();
    next
}

/// Every legal move for the side to move
///
/// Enumerated origin-first from a1 to h8, destinations in the same order.
/// A pawn reaching the last rank yields one move per promotion piece, in
/// [`PieceKind::PROMOTIONS`] order.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in position.squares_of(position.side_to_move) {
        for to in legal_destinations(position, from) {
            if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
                moves.extend(
                    PieceKind::PROMOTIONS
                        .iter()
                        .map(|&kind| Move::with_promotion(from, to, kind)),
                );
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

/// Legal destination squares of the piece on `from`
///
/// Empty when `from` is empty or holds a piece of the side not to move.
pub fn legal_destinations(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal_move(position, from, to))
        .collect()
}

/// True when the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    position
        .squares_of(position.side_to_move)
        .any(|(from, _)| Square::all().any(|to| is_legal_move(position, from, to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn play(position: &Position, moves: &[&str]) -> Position {
        moves.iter().fold(position.clone(), |current, text| {
            apply_move(&current, mv(text)).unwrap()
        })
    }

    #[test]
    fn test_twenty_moves_from_start() {
        let moves = legal_moves(&Position::starting());
        assert_eq!(moves.len(), 20, "White has 20 opening moves");
    }

    #[test]
    fn test_pawn_double_step_sets_en_passant_target() {
        let after = apply_move(&Position::starting(), mv("e2e4")).unwrap();
        assert_eq!(after.en_passant, Some(sq("e3")));
        assert_eq!(after.side_to_move, Color::Black);
        assert_eq!(after.halfmove_clock, 0);
        assert_eq!(after.fullmove_number, 1);

        let after = apply_move(&after, mv("g8f6")).unwrap();
        assert_eq!(after.en_passant, None);
        assert_eq!(after.halfmove_clock, 1);
        assert_eq!(after.fullmove_number, 2);
    }

    #[test]
    fn test_illegal_moves_leave_position_untouched() {
        let position = Position::starting();
        let before = position.clone();

        assert!(matches!(
            apply_move(&position, mv("e2e5")),
            Err(ChessEngineError::IllegalMove { .. })
        ));
        assert!(matches!(
            apply_move(&position, mv("e7e5")),
            Err(ChessEngineError::WrongPieceColor { .. })
        ));
        assert!(matches!(
            apply_move(&position, mv("e4e5")),
            Err(ChessEngineError::NoPieceAtSquare { .. })
        ));
        assert_eq!(position, before);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // Knight on e2 is pinned by the rook on e8
        let position = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(!is_legal_move(&position, sq("e2"), sq("c3")));
        assert!(legal_destinations(&position, sq("e2")).is_empty());
        assert!(is_legal_move(&position, sq("e1"), sq("d1")));
    }

    #[test]
    fn test_en_passant_capture_removes_pawn() {
        let position = play(&Position::starting(), &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(position.en_passant, Some(sq("d6")));

        let after = apply_move(&position, mv("e5d6")).unwrap();
        assert_eq!(after.piece_at(sq("d5")), None, "double-stepped pawn is removed");
        assert_eq!(
            after.piece_at(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn test_en_passant_expires_after_one_ply() {
        let position = play(
            &Position::starting(),
            &["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "a6a5"],
        );
        assert!(!is_legal_move(&position, sq("e5"), sq("d6")));
    }

    #[test]
    fn test_black_en_passant_mirrors_white() {
        let position = play(&Position::starting(), &["a2a3", "e7e5", "a3a4", "e5e4", "d2d4"]);
        assert_eq!(position.en_passant, Some(sq("d3")));
        let after = apply_move(&position, mv("e4d3")).unwrap();
        assert_eq!(after.piece_at(sq("d4")), None);
        assert_eq!(
            after.piece_at(sq("d3")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }

    #[test]
    fn test_castling_relocates_rook_and_revokes_rights() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        let kingside = apply_move(&position, mv("e1g1")).unwrap();
        assert_eq!(
            kingside.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(kingside.piece_at(sq("h1")), None);
        assert!(!kingside.castling.kingside(Color::White));
        assert!(!kingside.castling.queenside(Color::White));
        assert!(kingside.castling.kingside(Color::Black));

        let queenside = apply_move(&kingside, mv("e8c8")).unwrap();
        assert_eq!(
            queenside.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert_eq!(queenside.piece_at(sq("a8")), None);
        assert!(queenside.castling.is_empty());
    }

    #[test]
    fn test_castling_rejected_through_attacked_square() {
        let position = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(matches!(
            apply_move(&position, mv("e1g1")),
            Err(ChessEngineError::IllegalMove { .. })
        ));
        assert!(apply_move(&position, mv("e1c1")).is_ok());
    }

    #[test]
    fn test_rook_capture_on_corner_revokes_right() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = apply_move(&position, mv("a1a8")).unwrap();
        assert!(!after.castling.queenside(Color::White));
        assert!(!after.castling.queenside(Color::Black));
        assert!(after.castling.kingside(Color::Black));
    }

    #[test]
    fn test_promotion_requires_choice() {
        let position = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            apply_move(&position, mv("e7e8")),
            Err(ChessEngineError::PromotionRequired { .. })
        ));
        let after = apply_move(&position, mv("e7e8n")).unwrap();
        assert_eq!(
            after.piece_at(sq("e8")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
    }

    #[test]
    fn test_black_promotion_on_first_rank() {
        let position = Position::from_fen("4k3/8/8/8/8/8/3p4/K7 b - - 0 1").unwrap();
        let after = apply_move(&position, mv("d2d1q")).unwrap();
        assert_eq!(
            after.piece_at(sq("d1")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(after.fullmove_number, 2);
    }

    #[test]
    fn test_promotion_expands_to_four_moves() {
        let position = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let promotions: Vec<Move> = legal_moves(&position)
            .into_iter()
            .filter(|m| m.from == sq("e7"))
            .collect();
        assert_eq!(promotions.len(), 4);
        assert_eq!(promotions[0].promotion, Some(PieceKind::Queen));
        assert_eq!(promotions[3].promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn test_promotion_piece_rejected_on_ordinary_move() {
        assert!(matches!(
            apply_move(&Position::starting(), mv("e2e4q")),
            Err(ChessEngineError::IllegalMove { .. })
        ));
    }
}
