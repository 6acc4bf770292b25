//! Game over state tracking and result management
//!
//! Tracks end-game conditions (checkmate, stalemate, timeout) and provides
//! methods for determining the outcome and the announcement shown to players.
//!
//! # Game Over Conditions
//!
//! ## Checkmate
//! - **WhiteWon**: Black is in check with no legal moves
//! - **BlackWon**: White is in check with no legal moves
//!
//! ## Draw Conditions
//! - **Stalemate**: Side to move has no legal moves but is NOT in check
//!
//! ## Time Control
//! - **WhiteWonByTime**: Black's time expired
//! - **BlackWonByTime**: White's time expired
//!
//! # Integration
//!
//! Set by the [`crate::game::coordinator::GameCoordinator`] exactly once per
//! game; every worker checks [`GameOverState::is_game_over`] before acting.

use chess_engine::{Color, GameStatus};

/// The game's end state
///
/// Starts as `Playing` and transitions to a terminal state when the game ends.
///
/// # State Transitions
///
/// ```text
/// Playing → WhiteWon / BlackWon / Stalemate / WhiteWonByTime / BlackWonByTime
/// ```
///
/// All non-Playing states are terminal for the game instance.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameOverState {
    /// Game is still in progress
    #[default]
    Playing,

    /// White won by checkmate
    WhiteWon,

    /// Black won by checkmate
    BlackWon,

    /// Draw by stalemate
    ///
    /// Side to move has no legal moves but is NOT in check. An automatic
    /// draw regardless of material.
    Stalemate,

    /// White won on time
    WhiteWonByTime,

    /// Black won on time
    BlackWonByTime,
}

impl GameOverState {
    /// State matching a board status; `Ongoing` maps to `Playing`.
    pub fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::Ongoing => GameOverState::Playing,
            GameStatus::Checkmate {
                winner: Color::White,
            } => GameOverState::WhiteWon,
            GameStatus::Checkmate {
                winner: Color::Black,
            } => GameOverState::BlackWon,
            GameStatus::Stalemate => GameOverState::Stalemate,
        }
    }

    /// State after `loser` ran out of time.
    pub fn on_time(loser: Color) -> Self {
        match loser {
            Color::White => GameOverState::BlackWonByTime,
            Color::Black => GameOverState::WhiteWonByTime,
        }
    }

    /// Check if the game has ended
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// if coordinator.snapshot().game_over.is_game_over() {
    ///     return; // Don't process input when game is over
    /// }
    /// ```
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameOverState::Playing)
    }

    /// Human-readable message describing the game result
    pub fn message(&self) -> &'static str {
        match self {
            GameOverState::Playing => "Game in progress",
            GameOverState::WhiteWon => "White wins by checkmate!",
            GameOverState::BlackWon => "Black wins by checkmate!",
            GameOverState::Stalemate => "Draw by stalemate",
            GameOverState::WhiteWonByTime => "White wins on time!",
            GameOverState::BlackWonByTime => "Black wins on time!",
        }
    }

    /// Winner of the game, `None` for draws or ongoing games
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOverState::WhiteWon | GameOverState::WhiteWonByTime => Some(Color::White),
            GameOverState::BlackWon | GameOverState::BlackWonByTime => Some(Color::Black),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameOverState::Stalemate)
    }

    /// Check if the game ended by timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, GameOverState::WhiteWonByTime | GameOverState::BlackWonByTime)
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self, GameOverState::WhiteWon | GameOverState::BlackWon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_state_default() {
        //! Verifies GameOverState defaults to Playing
        let state = GameOverState::default();
        assert_eq!(state, GameOverState::Playing);
        assert!(!state.is_game_over());
        assert_eq!(state.message(), "Game in progress");
    }

    #[test]
    fn test_from_status() {
        //! Board statuses map onto game over states
        assert_eq!(
            GameOverState::from_status(GameStatus::Checkmate {
                winner: Color::Black
            }),
            GameOverState::BlackWon
        );
        assert_eq!(
            GameOverState::from_status(GameStatus::Stalemate),
            GameOverState::Stalemate
        );
        assert_eq!(
            GameOverState::from_status(GameStatus::Ongoing),
            GameOverState::Playing
        );
    }

    #[test]
    fn test_timeout_credits_the_opponent() {
        //! The side that ran out of time loses
        let state = GameOverState::on_time(Color::White);
        assert_eq!(state, GameOverState::BlackWonByTime);
        assert_eq!(state.winner(), Some(Color::Black));
        assert!(state.is_timeout());
        assert!(!state.is_checkmate());
        assert_eq!(state.message(), "Black wins on time!");
    }

    #[test]
    fn test_messages() {
        assert_eq!(GameOverState::WhiteWon.message(), "White wins by checkmate!");
        assert_eq!(GameOverState::BlackWon.message(), "Black wins by checkmate!");
        assert_eq!(GameOverState::Stalemate.message(), "Draw by stalemate");
        assert_eq!(GameOverState::WhiteWonByTime.message(), "White wins on time!");
    }

    #[test]
    fn test_stalemate_has_no_winner() {
        let state = GameOverState::Stalemate;
        assert_eq!(state.winner(), None);
        assert!(state.is_draw());
    }

    #[test]
    fn test_all_end_states_are_game_over() {
        //! Comprehensive test ensuring all non-Playing states are game over
        let states = [
            GameOverState::WhiteWon,
            GameOverState::BlackWon,
            GameOverState::Stalemate,
            GameOverState::WhiteWonByTime,
            GameOverState::BlackWonByTime,
        ];

        for state in states {
            assert!(state.is_game_over(), "{:?} should be game over", state);
        }
    }
}
