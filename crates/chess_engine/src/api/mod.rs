//! Public API for the chess engine
//!
//! Provides high-level functions for game management, move legality and
//! state queries. All functions are pure over [`crate::board::Position`].
//!
//! ## Module Organization
//!
//! - `game` - Game lifecycle (new_game, load_game)
//! - `moves` - Move validation and execution (is_legal_move, apply_move, legal_moves)
//! - `state` - Game state queries (game_status, infer_move)

mod game;
mod moves;
mod state;

pub use game::{load_game, new_game};
pub use moves::{
    apply_move, has_legal_move, is_legal_move, legal_destinations, legal_moves, validate_move,
};
pub use state::{game_status, infer_move, is_checkmate, is_stalemate};

pub(crate) use moves::play_unchecked;
