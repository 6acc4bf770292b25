//! AI trigger worker
//!
//! Waits for state changes and, whenever the engine's color is to move,
//! searches the current position on the blocking thread pool and submits the
//! result through the coordinator like any other move, stamped with the
//! epoch and ply it was searched at.
//!
//! The search is fixed-depth and always completes; there is no mid-search
//! cancellation. A result that arrives after the position moved on is
//! rejected by the coordinator as stale and the worker simply looks again.

use std::sync::Arc;
use std::time::Instant;

use chess_engine::search::search;
use chess_engine::Color;
use tracing::{debug, error, info, warn};

use super::coordinator::{GameCoordinator, MoveSource};
use super::error::GameError;

/// AI configuration for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlayer {
    pub color: Color,
    pub depth: u32,
}

impl AiPlayer {
    pub fn new(color: Color, depth: u32) -> Self {
        Self {
            color,
            depth: depth.max(1),
        }
    }
}

/// Run the AI until the game ends or the coordinator goes away
pub async fn run_ai_worker(coordinator: Arc<GameCoordinator>, player: AiPlayer) {
    let mut changes = coordinator.subscribe();
    info!("[AI] Playing {} at depth {}", player.color, player.depth);

    loop {
        changes.borrow_and_update();
        let snapshot = coordinator.snapshot();

        if snapshot.game_over.is_game_over() {
            info!("[AI] Game over, stopping");
            break;
        }

        if snapshot.side_to_move() == player.color {
            let position = snapshot.position.clone();
            let depth = player.depth;
            let started = Instant::now();

            let result = tokio::task::spawn_blocking(move || search(&position, depth)).await;
            match result {
                Ok(Some(found)) => {
                    info!(
                        "[AI] {} chose {} (score {}, {} nodes, {:?})",
                        player.color,
                        found.best_move,
                        found.score,
                        found.stats.nodes,
                        started.elapsed()
                    );
                    match coordinator.apply_move_at(found.best_move, MoveSource::Engine, snapshot.stamp()) {
                        Ok(_) => {}
                        Err(GameError::StaleMove { expected, actual }) => {
                            debug!("[AI] Discarding move computed at {} (now {})", expected, actual);
                        }
                        Err(GameError::GameOver { .. }) | Err(GameError::ClockExpired { .. }) => {
                            continue;
                        }
                        Err(e) => {
                            error!("[AI] Engine move {} was rejected: {}", found.best_move, e);
                            break;
                        }
                    }
                }
                Ok(None) => {
                    warn!("[AI] No legal move available for {}", player.color);
                    if changes.changed().await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("[AI] Search task failed: {}", e);
                    break;
                }
            }
            continue;
        }

        if changes.changed().await.is_err() {
            debug!("[AI] Coordinator dropped, stopping");
            break;
        }
    }
}
