//! Background workers around the coordinator
//!
//! - Clock ticker: advances the clock at a fixed cadence (the one worker that
//!   polls, since time passes without any state change)
//! - Reporter: turns state changes into [`StatusUpdate`]s for the front-end
//!
//! Every worker re-checks the game-over flag before acting and returns once
//! it is set.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chess_engine::Color;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::coordinator::GameCoordinator;

/// Human-facing status line produced by the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Side to move changed
    Turn { side: Color, ply: usize },
    /// A ply was logged; `text` is coordinate notation or "Unknown Move"
    LastMove { ply: usize, text: String },
    /// Position replaced from the front-end
    PositionLoaded { fen: String },
    GameOver { announcement: String },
}

impl std::fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusUpdate::Turn { side, ply } => write!(f, "{side} to move (ply {ply})"),
            StatusUpdate::LastMove { ply, text } => write!(f, "Last move [{ply}]: {text}"),
            StatusUpdate::PositionLoaded { fen } => write!(f, "Position loaded: {fen}"),
            StatusUpdate::GameOver { announcement } => f.write_str(announcement),
        }
    }
}

/// Tick the clock every `interval` until the game ends
pub async fn run_clock_ticker(coordinator: Arc<GameCoordinator>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(10)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if coordinator.is_game_over() {
            debug!("[CLOCK] Game over, ticker stopping");
            break;
        }
        if let Some(state) = coordinator.tick_clock(Instant::now()) {
            info!("[CLOCK] {}", state.message());
            break;
        }
    }
}

/// Report turn changes, last moves and the final result
///
/// Stops after announcing the end of the game, when the coordinator is
/// dropped, or when the receiving side hangs up.
pub async fn run_reporter(coordinator: Arc<GameCoordinator>, updates: mpsc::UnboundedSender<StatusUpdate>) {
    let mut changes = coordinator.subscribe();
    let mut seen = (u64::MAX, usize::MAX);

    loop {
        changes.borrow_and_update();
        let snapshot = coordinator.snapshot();
        let mut batch = Vec::new();

        if (snapshot.epoch, snapshot.ply) != seen {
            if seen.0 != u64::MAX && snapshot.epoch != seen.0 {
                batch.push(StatusUpdate::PositionLoaded {
                    fen: snapshot.fen.clone(),
                });
            } else if let Some(text) = snapshot.last_move.clone() {
                batch.push(StatusUpdate::LastMove {
                    ply: snapshot.ply,
                    text,
                });
            }
            if !snapshot.game_over.is_game_over() {
                batch.push(StatusUpdate::Turn {
                    side: snapshot.side_to_move(),
                    ply: snapshot.ply,
                });
            }
            seen = (snapshot.epoch, snapshot.ply);
        }

        if snapshot.game_over.is_game_over() {
            batch.push(StatusUpdate::GameOver {
                announcement: snapshot.game_over.message().to_string(),
            });
        }

        for update in batch {
            if updates.send(update).is_err() {
                return;
            }
        }

        if snapshot.game_over.is_game_over() {
            debug!("[TURN] Reporter stopping");
            break;
        }
        if changes.changed().await.is_err() {
            break;
        }
    }
}
