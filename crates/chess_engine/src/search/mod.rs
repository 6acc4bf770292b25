//! Fixed-depth alpha-beta search
//!
//! This module implements the AI move choice:
//! - Negamax variant of alpha-beta pruning
//! - Material-only evaluation (White minus Black, sign-flipped per side)
//! - No move ordering beyond enumeration order
//!
//! The root enumerates every legal move of the side to move and keeps the
//! first move that reaches the best score, so the result is deterministic for
//! a given position and depth.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search algorithm

mod alphabeta;

use std::time::Instant;

use tracing::debug;

use alphabeta::alphabeta;

use crate::api::{legal_moves, play_unchecked};
use crate::board::Position;
use crate::constants::AB_INF;
use crate::types::Move;

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score from the point of view of the side to move.
    pub score: i32,
    pub stats: SearchStats,
}

/// Search `position` to `depth` plies and return the best move with its score
///
/// `None` when the side to move has no legal move.
pub fn search(position: &Position, depth: u32) -> Option<SearchResult> {
    let started = Instant::now();
    let mut stats = SearchStats::default();
    let mut best: Option<(Move, i32)> = None;
    let mut alpha = -AB_INF;
    let beta = AB_INF;

    for mv in legal_moves(position) {
        let child = play_unchecked(position, mv);
        let score = -alphabeta(&child, depth.saturating_sub(1), -beta, -alpha, &mut stats);
        // Strictly greater keeps the first-found move on ties.
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
        if score > alpha {
            alpha = score;
        }
    }

    let (best_move, score) = best?;
    debug!(
        "[SEARCH] depth {} best {} score {} nodes {} cutoffs {} in {:?}",
        depth,
        best_move,
        score,
        stats.nodes,
        stats.cutoffs,
        started.elapsed()
    );
    Some(SearchResult {
        best_move,
        score,
        stats,
    })
}

/// Best move for the side to move at a fixed depth
///
/// # Examples
///
/// ```rust,ignore
/// let mv = select_best_move(&Position::starting(), DEFAULT_SEARCH_DEPTH);
/// assert!(mv.is_some());
/// ```
pub fn select_best_move(position: &Position, depth: u32) -> Option<Move> {
    search(position, depth).map(|result| result.best_move)
}
