//! netchess
//!
//! Console chess against a fixed-depth AI, with an optional TCP peer that
//! proposes positions as FEN text. Rules, FEN and search live in the
//! `chess_engine` crate; this crate owns the running game.
//!
//! ## Module Organization
//!
//! - [`core`]: settings file and command-line flags
//! - [`game`]: clock, coordinator and the background workers
//! - [`networking`]: position sync server and peer client
//! - [`persistence`]: SQLite position store and XML move log
//! - [`ui`]: console front-end

pub mod core;
pub mod game;
pub mod networking;
pub mod persistence;
pub mod ui;
