//! Move log
//!
//! Append-only sequence of positions in FEN, one entry per ply after the
//! initial setup. The initial position is kept alongside so the first move
//! can be reported like any other.

use chess_engine::constants::UNKNOWN_MOVE;
use chess_engine::{infer_move, parse_fen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLog {
    initial: String,
    entries: Vec<String>,
}

impl MoveLog {
    pub fn new(initial_fen: impl Into<String>) -> Self {
        Self {
            initial: initial_fen.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, fen: impl Into<String>) {
        self.entries.push(fen.into());
    }

    /// Number of plies recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current position: the last entry, or the initial position.
    pub fn latest(&self) -> &str {
        self.entries.last().map_or(self.initial.as_str(), String::as_str)
    }

    /// Position before and after the last ply.
    pub fn last_pair(&self) -> Option<(&str, &str)> {
        let after = self.entries.last()?;
        let before = match self.entries.len() {
            1 => self.initial.as_str(),
            n => self.entries[n - 2].as_str(),
        };
        Some((before, after.as_str()))
    }

    /// Coordinate notation of the last ply
    ///
    /// `None` before any ply; `"Unknown Move"` when the two logged positions
    /// are not one legal move apart.
    pub fn last_move_text(&self) -> Option<String> {
        let (before, after) = self.last_pair()?;
        let described = match (parse_fen(before), parse_fen(after)) {
            (Ok(before), Ok(after)) => infer_move(&before, &after).map(|mv| mv.to_string()),
            _ => None,
        };
        Some(described.unwrap_or_else(|| UNKNOWN_MOVE.to_string()))
    }
}
