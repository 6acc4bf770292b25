//! Game clock
//!
//! A chess clock as a pure state machine. Time never comes from inside: every
//! operation takes the current [`Instant`], so the clock is driven by the
//! ticker worker in production and by synthetic instants in tests.
//!
//! # States
//!
//! ```text
//! Idle ──first move──▶ Running ──time reaches zero──▶ Expired { loser }
//!                         │
//!                         └──────game over (mate / stalemate)──▶ Stopped
//! ```
//!
//! `Expired` and `Stopped` are terminal for the game instance. Mode changes
//! are refused in either, so an expired clock can never un-expire.
//!
//! # Modes
//!
//! | Preset            | Mode                               |
//! |-------------------|------------------------------------|
//! | `untimed`         | [`ClockMode::Untimed`]             |
//! | `5min`            | `FixedCountdown(5 min)`            |
//! | `10min`           | `FixedCountdown(10 min)`           |
//! | `10min_increment` | `IncrementCountdown(10 min, 15 s)` |
//! | `N`               | `FixedCountdown(N min)`            |
//! | `N+inc`           | `IncrementCountdown(N min, inc s)` |

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chess_engine::Color;

use crate::core::CoreError;
use crate::game::error::{GameError, GameResult};

/// Time control of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClockMode {
    Untimed,
    FixedCountdown(Duration),
    IncrementCountdown {
        initial: Duration,
        increment: Duration,
    },
}

impl ClockMode {
    pub const FIVE_MINUTES: ClockMode = ClockMode::FixedCountdown(Duration::from_secs(300));
    pub const TEN_MINUTES: ClockMode = ClockMode::FixedCountdown(Duration::from_secs(600));
    pub const TEN_MINUTES_INCREMENT: ClockMode = ClockMode::IncrementCountdown {
        initial: Duration::from_secs(600),
        increment: Duration::from_secs(15),
    };

    /// Starting allotment per side, `None` when untimed.
    pub fn initial(&self) -> Option<Duration> {
        match *self {
            ClockMode::Untimed => None,
            ClockMode::FixedCountdown(initial) => Some(initial),
            ClockMode::IncrementCountdown { initial, .. } => Some(initial),
        }
    }

    pub fn increment(&self) -> Duration {
        match *self {
            ClockMode::IncrementCountdown { increment, .. } => increment,
            _ => Duration::ZERO,
        }
    }

    pub fn is_timed(&self) -> bool {
        !matches!(self, ClockMode::Untimed)
    }
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ClockMode::Untimed => f.write_str("untimed"),
            mode if mode == ClockMode::FIVE_MINUTES => f.write_str("5min"),
            mode if mode == ClockMode::TEN_MINUTES => f.write_str("10min"),
            mode if mode == ClockMode::TEN_MINUTES_INCREMENT => f.write_str("10min_increment"),
            ClockMode::FixedCountdown(initial) => write!(f, "{}", initial.as_secs() / 60),
            ClockMode::IncrementCountdown { initial, increment } => {
                write!(f, "{}+{}", initial.as_secs() / 60, increment.as_secs())
            }
        }
    }
}

impl FromStr for ClockMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let invalid = || CoreError::InvalidClockMode {
            value: s.to_string(),
        };
        let minutes = |value: &str| -> Result<Duration, CoreError> {
            match value.trim().parse::<u64>() {
                Ok(m) if m > 0 => Ok(Duration::from_secs(m * 60)),
                _ => Err(invalid()),
            }
        };

        match text.as_str() {
            "untimed" | "none" | "unlimited" => Ok(ClockMode::Untimed),
            "5min" => Ok(ClockMode::FIVE_MINUTES),
            "10min" => Ok(ClockMode::TEN_MINUTES),
            "10min_increment" => Ok(ClockMode::TEN_MINUTES_INCREMENT),
            custom => match custom.split_once('+') {
                Some((initial, increment)) => {
                    let increment = increment.trim().parse::<u64>().map_err(|_| invalid())?;
                    Ok(ClockMode::IncrementCountdown {
                        initial: minutes(initial)?,
                        increment: Duration::from_secs(increment),
                    })
                }
                None => Ok(ClockMode::FixedCountdown(minutes(custom)?)),
            },
        }
    }
}

impl TryFrom<String> for ClockMode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockMode> for String {
    fn from(mode: ClockMode) -> Self {
        mode.to_string()
    }
}

/// Lifecycle of the clock within one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No move played yet
    Idle,
    Running,
    /// A side ran out of time
    Expired { loser: Color },
    /// Game ended some other way
    Stopped,
}

impl ClockState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClockState::Expired { .. } | ClockState::Stopped)
    }
}

/// Both players' remaining time plus the state machine driving them
#[derive(Debug, Clone)]
pub struct GameClock {
    mode: ClockMode,
    white_remaining: Duration,
    black_remaining: Duration,
    active: Color,
    state: ClockState,
    last_tick: Option<Instant>,
}

impl GameClock {
    pub fn new(mode: ClockMode) -> Self {
        let initial = mode.initial().unwrap_or_default();
        Self {
            mode,
            white_remaining: initial,
            black_remaining: initial,
            active: Color::White,
            state: ClockState::Idle,
            last_tick: None,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Side whose time is running.
    pub fn active(&self) -> Color {
        self.active
    }

    /// Remaining time of `color`, `None` when untimed.
    pub fn remaining(&self, color: Color) -> Option<Duration> {
        if !self.mode.is_timed() {
            return None;
        }
        Some(match color {
            Color::White => self.white_remaining,
            Color::Black => self.black_remaining,
        })
    }

    fn remaining_mut(&mut self, color: Color) -> &mut Duration {
        match color {
            Color::White => &mut self.white_remaining,
            Color::Black => &mut self.black_remaining,
        }
    }

    /// Switch to a new mode, resetting both sides to its allotment
    ///
    /// A running clock keeps running from `now` with the same side active; an
    /// idle clock stays idle.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] once the clock is expired or stopped.
    pub fn set_mode(&mut self, mode: ClockMode, now: Instant) -> GameResult<()> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver {
                announcement: "the clock has stopped".to_string(),
            });
        }
        let initial = mode.initial().unwrap_or_default();
        self.mode = mode;
        self.white_remaining = initial;
        self.black_remaining = initial;
        if self.state == ClockState::Running {
            self.last_tick = Some(now);
        }
        Ok(())
    }

    /// Charge elapsed time to the active side
    ///
    /// Returns `Some(loser)` exactly once: on the tick that takes the active
    /// side to zero. Any later tick returns `None`.
    pub fn tick(&mut self, now: Instant) -> Option<Color> {
        if self.state != ClockState::Running {
            return None;
        }
        let elapsed = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        if !self.mode.is_timed() {
            return None;
        }

        let active = self.active;
        let remaining = self.remaining_mut(active);
        *remaining = remaining.saturating_sub(elapsed);
        if remaining.is_zero() {
            self.state = ClockState::Expired { loser: active };
            return Some(active);
        }
        None
    }

    /// Record a completed move by `mover`
    ///
    /// The first move of the game starts the clock without charging anyone.
    /// Afterwards the mover is charged up to `now`. Every move, the first
    /// included, earns the mover the increment and starts the opponent's time. Returns `Some(loser)` if the mover's time
    /// ran out before the move.
    pub fn on_move(&mut self, mover: Color, now: Instant) -> Option<Color> {
        match self.state {
            ClockState::Idle => {
                if self.mode.is_timed() {
                    let increment = self.mode.increment();
                    *self.remaining_mut(mover) += increment;
                }
                self.state = ClockState::Running;
                self.active = mover.opposite();
                self.last_tick = Some(now);
                None
            }
            ClockState::Running => {
                if let Some(loser) = self.tick(now) {
                    return Some(loser);
                }
                let increment = self.mode.increment();
                if self.mode.is_timed() {
                    *self.remaining_mut(mover) += increment;
                }
                self.active = mover.opposite();
                None
            }
            ClockState::Expired { .. } | ClockState::Stopped => None,
        }
    }

    /// Freeze both timers because the game ended on the board.
    pub fn stop(&mut self) {
        if !self.state.is_terminal() {
            self.state = ClockState::Stopped;
        }
    }

    /// `HH:MM:SS` for `color`, `--:--:--` when untimed.
    pub fn display(&self, color: Color) -> String {
        match self.remaining(color) {
            Some(remaining) => format_hms(remaining),
            None => "--:--:--".to_string(),
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(ClockMode::Untimed)
    }
}

/// Format a duration as `HH:MM:SS`, rounding partial seconds down.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_preset_parsing() {
        //! Named presets and custom forms map onto modes
        assert_eq!("untimed".parse::<ClockMode>().unwrap(), ClockMode::Untimed);
        assert_eq!("5min".parse::<ClockMode>().unwrap(), ClockMode::FixedCountdown(secs(300)));
        assert_eq!(
            "10min_increment".parse::<ClockMode>().unwrap(),
            ClockMode::IncrementCountdown {
                initial: secs(600),
                increment: secs(15)
            }
        );
        assert_eq!("3".parse::<ClockMode>().unwrap(), ClockMode::FixedCountdown(secs(180)));
        assert_eq!(
            "3+2".parse::<ClockMode>().unwrap(),
            ClockMode::IncrementCountdown {
                initial: secs(180),
                increment: secs(2)
            }
        );
        assert!("0".parse::<ClockMode>().is_err());
        assert!("fast".parse::<ClockMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for text in ["untimed", "5min", "10min", "10min_increment", "3", "3+2"] {
            let mode: ClockMode = text.parse().unwrap();
            assert_eq!(mode.to_string(), text);
        }
    }

    #[test]
    fn test_idle_until_first_move() {
        //! Ticks before the first move charge nobody
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::TEN_MINUTES);
        assert_eq!(clock.tick(start + secs(30)), None);
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.remaining(Color::White), Some(secs(600)));

        clock.on_move(Color::White, start + secs(30));
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.active(), Color::Black);
        assert_eq!(clock.remaining(Color::White), Some(secs(600)));
    }

    #[test]
    fn test_active_side_is_charged() {
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::FIVE_MINUTES);
        clock.on_move(Color::White, start);
        clock.tick(start + secs(10));
        clock.on_move(Color::Black, start + secs(25));

        assert_eq!(clock.remaining(Color::Black), Some(secs(275)));
        assert_eq!(clock.remaining(Color::White), Some(secs(300)));
        assert_eq!(clock.active(), Color::White);
    }

    #[test]
    fn test_increment_goes_to_the_mover() {
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::TEN_MINUTES_INCREMENT);
        clock.on_move(Color::White, start);
        clock.on_move(Color::Black, start + secs(5));
        assert_eq!(clock.remaining(Color::Black), Some(secs(610)));
    }

    #[test]
    fn test_first_move_earns_increment() {
        //! White's opening move is not charged but still earns the increment
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::TEN_MINUTES_INCREMENT);
        clock.on_move(Color::White, start + secs(40));

        assert_eq!(clock.remaining(Color::White), Some(secs(615)));
        assert_eq!(clock.remaining(Color::Black), Some(secs(600)));
        assert_eq!(clock.display(Color::White), "00:10:15");
    }

    #[test]
    fn test_expiry_reported_exactly_once() {
        //! Reaching zero reports the loser once and then stays expired
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::TEN_MINUTES);
        clock.on_move(Color::White, start);

        assert_eq!(clock.tick(start + secs(599)), None);
        assert_eq!(clock.tick(start + secs(600)), Some(Color::Black));
        assert_eq!(clock.tick(start + secs(700)), None);
        assert_eq!(clock.state(), ClockState::Expired { loser: Color::Black });
        assert_eq!(clock.display(Color::Black), "00:00:00");
    }

    #[test]
    fn test_mode_change_rejected_after_expiry() {
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::FIVE_MINUTES);
        clock.on_move(Color::White, start);
        clock.tick(start + secs(301));

        assert!(clock.set_mode(ClockMode::TEN_MINUTES, start + secs(302)).is_err());
        assert_eq!(clock.state(), ClockState::Expired { loser: Color::Black });
    }

    #[test]
    fn test_mode_change_resets_both_sides() {
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::FIVE_MINUTES);
        clock.on_move(Color::White, start);
        clock.tick(start + secs(60));

        clock.set_mode(ClockMode::TEN_MINUTES, start + secs(60)).unwrap();
        assert_eq!(clock.remaining(Color::Black), Some(secs(600)));
        assert_eq!(clock.remaining(Color::White), Some(secs(600)));
        assert_eq!(clock.state(), ClockState::Running);

        clock.tick(start + secs(70));
        assert_eq!(clock.remaining(Color::Black), Some(secs(590)));
    }

    #[test]
    fn test_untimed_never_expires() {
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::Untimed);
        clock.on_move(Color::White, start);
        assert_eq!(clock.tick(start + secs(100_000)), None);
        assert_eq!(clock.display(Color::White), "--:--:--");
    }

    #[test]
    fn test_stop_freezes_clock() {
        let start = Instant::now();
        let mut clock = GameClock::new(ClockMode::FIVE_MINUTES);
        clock.on_move(Color::White, start);
        clock.stop();
        assert_eq!(clock.tick(start + secs(1000)), None);
        assert_eq!(clock.remaining(Color::Black), Some(secs(300)));
    }

    #[test]
    fn test_hms_formatting() {
        assert_eq!(format_hms(secs(600)), "00:10:00");
        assert_eq!(format_hms(secs(3725)), "01:02:05");
        assert_eq!(format_hms(Duration::from_millis(999)), "00:00:00");
    }
}
