//! Game coordination
//!
//! Everything between the rules engine and the outside world: the clock, the
//! authoritative game record and the workers that react to it.
//!
//! ## Module Organization
//!
//! - `clock` - Clock modes and the clock state machine
//! - `coordinator` - The single owner of position, log, clock and result
//! - `game_over` - Terminal states and their announcements
//! - `history` - Append-only FEN move log
//! - `ai` - Worker that plays the engine's side
//! - `workers` - Clock ticker and status reporter

pub mod ai;
pub mod clock;
pub mod coordinator;
pub mod error;
pub mod game_over;
pub mod history;
pub mod workers;

pub use ai::{run_ai_worker, AiPlayer};
pub use clock::{ClockMode, ClockState, GameClock};
pub use coordinator::{
    GameCoordinator, GameSnapshot, MoveOutcome, MoveSource, MoveStamp, StateChange,
};
pub use error::{GameError, GameResult};
pub use game_over::GameOverState;
pub use history::MoveLog;
pub use workers::{run_clock_ticker, run_reporter, StatusUpdate};
