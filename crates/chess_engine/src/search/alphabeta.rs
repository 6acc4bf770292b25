//! Alpha-beta search with negamax
//!
//! Plain recursive negamax over [`legal_moves`] in enumeration order. The
//! recursion depth is bounded by the requested search depth, so the call
//! stack never grows past a handful of frames.

use super::SearchStats;
use crate::api::{legal_moves, play_unchecked};
use crate::board::Position;
use crate::evaluation::evaluate_for_side;

/// Negamax score of `position` for the side to move
///
/// Depth zero or a position without legal moves returns the static material
/// evaluation. Remaining siblings are pruned as soon as `beta <= alpha`.
pub(crate) fn alphabeta(
    position: &Position,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 {
        return evaluate_for_side(position);
    }

    let moves = legal_moves(position);
    if moves.is_empty() {
        return evaluate_for_side(position);
    }

    let mut best = -crate::constants::AB_INF;
    for mv in moves {
        let child = play_unchecked(position, mv);
        let score = -alphabeta(&child, depth - 1, -beta, -alpha, stats);
        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }
    best
}
