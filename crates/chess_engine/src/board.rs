//! Board representation
//!
//! [`Position`] is the authoritative game state at one point in time: square
//! occupancy plus side to move, castling rights, en-passant target and the two
//! move counters. Square contents are answered by direct indexed lookup; the
//! rules never depend on anything outside this struct.

use std::fmt;

use crate::types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Complete game state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Indexed by [`Square::index`]; one piece per square at most.
    pub squares: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square skipped by a pawn double-step on the previous ply.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Starts at 1, incremented after Black moves.
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    /// Board with no pieces, White to move, no castling rights.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Standard starting position.
    pub fn starting() -> Self {
        let mut position = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            position.squares[file as usize] = Some(Piece::new(*kind, Color::White));
            position.squares[(8 + file) as usize] = Some(Piece::new(PieceKind::Pawn, Color::White));
            position.squares[(48 + file) as usize] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            position.squares[(56 + file) as usize] = Some(Piece::new(*kind, Color::Black));
        }
        position.castling = CastlingRights::ALL;
        position
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color)
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Remove and return whatever stands on `square`.
    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Squares holding pieces of `color`, a1 first.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| match self.piece_at(square) {
            Some(piece) if piece.color == color => Some((square, piece)),
            _ => None,
        })
    }

    /// Location of the king of `color`. `None` only on a corrupted board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Number of kings of `color` on the board.
    pub fn king_count(&self, color: Color) -> usize {
        self.squares_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count()
    }

    /// Same placement and side to move; counters and rights ignored.
    ///
    /// Used to recognise which legal move turned one position into another.
    pub fn same_placement(&self, other: &Position) -> bool {
        self.squares == other.squares && self.side_to_move == other.side_to_move
    }
}

/// ASCII diagram, rank 8 on top, uppercase White.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                let square = Square::from_coords(file, rank).ok_or(fmt::Error)?;
                let c = self.piece_at(square).map_or('.', Piece::to_fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  +----------------")?;
        write!(f, "    a b c d e f g h   ({} to move)", self.side_to_move)
    }
}
