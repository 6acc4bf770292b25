//! Chess rules engine
//!
//! A pure, synchronous rules engine: position representation, FEN codec,
//! per-piece move legality, check / checkmate / stalemate detection, special
//! moves, material evaluation and a fixed-depth alpha-beta search.
//!
//! ## Module Organization
//!
//! - `types` - Colors, pieces, squares, moves, castling rights
//! - `board` - [`Position`], the authoritative game state
//! - `fen` - Forsyth–Edwards Notation parsing and serialisation
//! - `move_gen` - Pseudo-legal movement rules and attack detection
//! - `api` - Legality, move application and game status
//! - `evaluation` - Material balance
//! - `search` - Negamax alpha-beta move selection
//!
//! # Examples
//!
//! ```rust,ignore
//! use chess_engine::{apply_move, game_status, Position};
//!
//! let position = apply_move(&Position::starting(), "e2e4".parse()?)?;
//! assert_eq!(game_status(&position), GameStatus::Ongoing);
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod move_gen;
pub mod search;
pub mod types;

pub use api::{
    apply_move, game_status, infer_move, is_legal_move, legal_destinations, legal_moves,
    load_game, new_game, validate_move,
};
pub use board::Position;
pub use error::{ChessEngineError, ChessEngineResult};
pub use fen::{parse_fen, to_fen};
pub use search::{select_best_move, SearchResult};
pub use types::{CastlingRights, Color, GameStatus, Move, Piece, PieceKind, Square};
