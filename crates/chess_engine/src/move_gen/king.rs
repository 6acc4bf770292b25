//! King movement and castling
//!
//! ## King Movement Rules
//!
//! - One square in any direction
//! - Castling: two squares towards a rook that has never moved, with the
//!   squares between them empty and the king not passing through check
//!
//! ## Castling Conditions
//!
//! | Side      | King path  | Must be empty | Rook corner |
//! |-----------|------------|---------------|-------------|
//! | Kingside  | e → f → g  | f, g          | h           |
//! | Queenside | e → d → c  | b, c, d       | a           |
//!
//! The origin, transit and destination squares must not be attacked by the
//! opponent. Rights are tracked in [`crate::types::CastlingRights`].

use super::attack::is_square_attacked;
use super::sliding::deltas;
use crate::board::Position;
use crate::types::{Color, Piece, PieceKind, Square};

/// Single-step king move, no castling.
pub fn is_valid_king_step(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    from != to && df.abs() <= 1 && dr.abs() <= 1
}

/// Which way a castling move goes, if `from -> to` is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Rook corner file, rook landing file and files that must be empty.
    const fn layout(self) -> (i8, i8, &'static [i8]) {
        match self {
            CastleSide::Kingside => (7, 5, &[5, 6]),
            CastleSide::Queenside => (0, 3, &[1, 2, 3]),
        }
    }
}

/// Detect a king move that is shaped like castling for `color`.
pub fn castle_side(from: Square, to: Square, color: Color) -> Option<CastleSide> {
    let back = color.back_rank();
    if from.file() != 4 || from.rank() != back || to.rank() != back {
        return None;
    }
    match to.file() {
        6 => Some(CastleSide::Kingside),
        2 => Some(CastleSide::Queenside),
        _ => None,
    }
}

/// Rook origin and destination for a castling move.
pub fn castle_rook_squares(color: Color, side: CastleSide) -> Option<(Square, Square)> {
    let rank = color.back_rank() as i8;
    let (corner, landing, _) = side.layout();
    Some((
        Square::from_coords(corner, rank)?,
        Square::from_coords(landing, rank)?,
    ))
}

/// Every castling condition: rights, rook on its corner, empty squares
/// between, and origin, transit and destination not attacked.
pub fn can_castle(position: &Position, color: Color, side: CastleSide) -> bool {
    let has_right = match side {
        CastleSide::Kingside => position.castling.kingside(color),
        CastleSide::Queenside => position.castling.queenside(color),
    };
    if !has_right {
        return false;
    }

    let rank = color.back_rank() as i8;
    let (corner, _, between) = side.layout();

    let rook_home = Square::from_coords(corner, rank)
        .and_then(|square| position.piece_at(square));
    if rook_home != Some(Piece::new(PieceKind::Rook, color)) {
        return false;
    }

    let king_home = Square::from_coords(4, rank).and_then(|square| position.piece_at(square));
    if king_home != Some(Piece::new(PieceKind::King, color)) {
        return false;
    }

    let all_empty = between.iter().all(|&file| {
        Square::from_coords(file, rank).is_some_and(|square| position.is_empty(square))
    });
    if !all_empty {
        return false;
    }

    let king_path: [i8; 3] = match side {
        CastleSide::Kingside => [4, 5, 6],
        CastleSide::Queenside => [4, 3, 2],
    };
    let enemy = color.opposite();
    king_path.iter().all(|&file| {
        Square::from_coords(file, rank)
            .is_some_and(|square| !is_square_attacked(position, square, enemy))
    })
}

/// Pseudo-legal king move for a king of `color` on `from`, castling included.
pub fn is_valid_king_move(position: &Position, from: Square, to: Square, color: Color) -> bool {
    if is_valid_king_step(from, to) {
        return true;
    }
    match castle_side(from, to, color) {
        Some(side) => can_castle(position, color, side),
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
    fn test_castling_both_sides_when_clear() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(can_castle(&position, Color::White, CastleSide::Kingside));
        assert!(can_castle(&position, Color::White, CastleSide::Queenside));
        assert!(can_castle(&position, Color::Black, CastleSide::Kingside));
        assert!(is_valid_king_move(&position, sq("e1"), sq("g1"), Color::White));
        assert!(is_valid_king_move(&position, sq("e8"), sq("c8"), Color::Black));
    }

    #[test]
    fn test_castling_blocked_through_attacked_square() {
        // Black rook on f8 covers f1
        let position = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!can_castle(&position, Color::White, CastleSide::Kingside));
        assert!(can_castle(&position, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn test_castling_needs_rights_and_empty_squares() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w K - 0 1").unwrap();
        assert!(can_castle(&position, Color::White, CastleSide::Kingside));
        assert!(!can_castle(&position, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn test_rook_positions_for_castling() {
        assert_eq!(
            castle_rook_squares(Color::Black, CastleSide::Queenside),
            Some((sq("a8"), sq("d8")))
        );
        assert_eq!(
            castle_rook_squares(Color::White, CastleSide::Kingside),
            Some((sq("h1"), sq("f1")))
        );
    }
}
