//! Forsyth–Edwards Notation codec
//!
//! Serialises a [`Position`] to FEN text and parses it back. Ranks are written
//! 8 → 1, files a → h, runs of empty squares as a digit, uppercase for White.
//! The six space-separated fields are placement, side to move, castling,
//! en-passant target, halfmove clock and fullmove number.
//!
//! Parsing is strict about the first four fields and lenient about the last
//! two: a missing halfmove clock defaults to `0` and a missing fullmove number
//! to `1`. `parse_fen(&to_fen(p)) == Ok(p)` holds for every valid position.

use std::str::FromStr;

use crate::board::Position;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

/// Parse FEN text into a position.
///
/// # Errors
///
/// [`ChessEngineError::MalformedPosition`] when fewer than four fields are
/// present, a rank does not cover exactly eight files, an unknown piece
/// letter appears, any field is unreadable, or either side does not have
/// exactly one king.
///
/// # Examples
///
/// ```rust,ignore
/// let position = parse_fen("8/8/8/8/8/8/8/K6k w - - 0 1")?;
/// assert_eq!(position.side_to_move, Color::White);
/// ```
pub fn parse_fen(fen: &str) -> ChessEngineResult<Position> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(ChessEngineError::malformed(format!(
            "expected at least 4 fields, found {}",
            fields.len()
        )));
    }
    if fields.len() > 6 {
        return Err(ChessEngineError::malformed(format!(
            "expected at most 6 fields, found {}",
            fields.len()
        )));
    }

    let mut position = Position::empty();
    parse_placement(fields[0], &mut position)?;

    position.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(ChessEngineError::malformed(format!(
                "side to move must be 'w' or 'b', found {other:?}"
            )))
        }
    };

    position.castling = parse_castling(fields[2])?;

    position.en_passant = match fields[3] {
        "-" => None,
        text => Some(text.parse::<Square>().map_err(|_| {
            ChessEngineError::malformed(format!("bad en-passant square {text:?}"))
        })?),
    };

    position.halfmove_clock = parse_counter(fields.get(4).copied(), 0, "halfmove clock")?;
    position.fullmove_number = parse_counter(fields.get(5).copied(), 1, "fullmove number")?;

    for color in [Color::White, Color::Black] {
        let kings = position.king_count(color);
        if kings != 1 {
            return Err(ChessEngineError::malformed(format!(
                "{color} must have exactly one king, found {kings}"
            )));
        }
    }

    Ok(position)
}

fn parse_placement(placement: &str, position: &mut Position) -> ChessEngineResult<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessEngineError::malformed(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - row as i8;
        let mut file: i8 = 0;
        for c in rank_text.chars() {
            if let Some(run) = c.to_digit(10) {
                if run == 0 || run > 8 {
                    return Err(ChessEngineError::malformed(format!(
                        "bad empty-square count {c:?} on rank {}",
                        rank + 1
                    )));
                }
                file += run as i8;
            } else {
                let piece = Piece::from_fen_char(c).ok_or_else(|| {
                    ChessEngineError::malformed(format!("unrecognized piece letter {c:?}"))
                })?;
                if let Some(square) = Square::from_coords(file, rank) {
                    position.set_piece(square, Some(piece));
                }
                file += 1;
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(ChessEngineError::malformed(format!(
                "rank {} covers {} files instead of 8",
                rank + 1,
                file
            )));
        }
    }
    Ok(())
}

fn parse_castling(text: &str) -> ChessEngineResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for c in text.chars() {
        let flag = match c {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => {
                return Err(ChessEngineError::malformed(format!(
                    "bad castling field {text:?}"
                )))
            }
        };
        *flag = true;
    }
    Ok(rights)
}

fn parse_counter(field: Option<&str>, default: u32, name: &str) -> ChessEngineResult<u32> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| ChessEngineError::malformed(format!("bad {name} {text:?}"))),
    }
}

/// Serialise a position to FEN text.
pub fn to_fen(position: &Position) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8).rev() {
        let mut empty_run = 0;
        for file in 0..8 {
            let piece = Square::from_coords(file, rank).and_then(|square| position.piece_at(square));
            match piece {
                None => empty_run += 1,
                Some(piece) => {
                    if empty_run > 0 {
                        fen.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    fen.push(piece.to_fen_char());
                }
            }
        }
        if empty_run > 0 {
            fen.push_str(&empty_run.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match position.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    let rights = position.castling;
    if rights.is_empty() {
        fen.push('-');
    } else {
        for (flag, c) in [
            (rights.white_kingside, 'K'),
            (rights.white_queenside, 'Q'),
            (rights.black_kingside, 'k'),
            (rights.black_queenside, 'q'),
        ] {
            if flag {
                fen.push(c);
            }
        }
    }

    fen.push(' ');
    match position.en_passant {
        Some(square) => fen.push_str(&square.to_string()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(
        " {} {}",
        position.halfmove_clock, position.fullmove_number
    ));
    fen
}

impl Position {
    #[inline]
    pub fn from_fen(fen: &str) -> ChessEngineResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        to_fen(self)
    }
}

impl FromStr for Position {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fen(s)
    }
}
