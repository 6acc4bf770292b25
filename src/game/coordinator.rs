//! Turn / game-state coordinator
//!
//! The single owner of the authoritative game state: position, move log,
//! game-over flag and clock. Every read and write goes through here.
//!
//! # Concurrency
//!
//! - State lives behind a [`parking_lot::RwLock`]. Readers take cheap
//!   snapshots; a move holds the write lock for validation, application and
//!   log append together, so moves are strictly serialised and no reader
//!   ever sees a half-applied move.
//! - Every mutation bumps a version number and publishes a [`StateChange`]
//!   on a [`tokio::sync::watch`] channel. Workers wait on that channel
//!   instead of polling.
//! - The lock is never held across an `.await`.
//!
//! # Example
//!
//! ```rust,ignore
//! let coordinator = Arc::new(GameCoordinator::new(Position::starting(), ClockMode::TEN_MINUTES, Some(Color::Black)));
//! coordinator.apply_move("e2e4".parse()?, MoveSource::Human)?;
//! let mut changes = coordinator.subscribe();
//! changes.changed().await?;
//! ```

use std::fmt;
use std::time::Instant;

use chess_engine::{
    apply_move, game_status, infer_move, legal_destinations, load_game, parse_fen, Color,
    GameStatus, Move, Position, Square,
};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::clock::{ClockMode, ClockState, GameClock};
use super::error::{GameError, GameResult};
use super::game_over::GameOverState;
use super::history::MoveLog;

/// Who proposed a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Local player through the front-end
    Human,
    /// The AI worker
    Engine,
    /// Network peer
    Remote,
}

/// Published after every mutation of the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateChange {
    /// Strictly increasing per mutation.
    pub version: u64,
    /// Incremented when the position is replaced wholesale.
    pub epoch: u64,
    /// Plies in the move log of the current epoch.
    pub ply: usize,
    pub game_over: GameOverState,
}

/// Epoch and ply a move was computed against
///
/// Two stamps are equal only when no ply was played and no position was
/// loaded in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveStamp {
    pub epoch: u64,
    pub ply: usize,
}

impl fmt::Display for MoveStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch {} ply {}", self.epoch, self.ply)
    }
}

/// Consistent copy of the game state at one version
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub version: u64,
    pub epoch: u64,
    pub position: Position,
    /// FEN of `position`, as last written to the move log.
    pub fen: String,
    pub ply: usize,
    pub game_over: GameOverState,
    pub clock_mode: ClockMode,
    pub clock_state: ClockState,
    pub white_clock: String,
    pub black_clock: String,
    pub last_move: Option<String>,
    /// Initial position followed by every logged position of this epoch.
    pub log: Vec<String>,
}

impl GameSnapshot {
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Identifies the position this snapshot was taken at.
    pub fn stamp(&self) -> MoveStamp {
        MoveStamp {
            epoch: self.epoch,
            ply: self.ply,
        }
    }
}

/// Result of a successfully applied move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub mover: Color,
    pub fen: String,
    pub ply: usize,
    pub game_over: GameOverState,
}

#[derive(Debug)]
struct GameRecord {
    position: Position,
    log: MoveLog,
    game_over: GameOverState,
    clock: GameClock,
    last_move: Option<String>,
    version: u64,
    epoch: u64,
}

impl GameRecord {
    fn stamp(&self) -> MoveStamp {
        MoveStamp {
            epoch: self.epoch,
            ply: self.log.len(),
        }
    }

    fn change(&self) -> StateChange {
        StateChange {
            version: self.version,
            epoch: self.epoch,
            ply: self.log.len(),
            game_over: self.game_over,
        }
    }

    fn finish(&mut self, state: GameOverState) {
        if !self.game_over.is_game_over() && state.is_game_over() {
            self.game_over = state;
            self.clock.stop();
            info!("[TURN] Game over: {}", state.message());
        }
    }
}

/// Mediates all access to the authoritative game state
pub struct GameCoordinator {
    record: RwLock<GameRecord>,
    notifier: watch::Sender<StateChange>,
    ai_color: Option<Color>,
}

impl GameCoordinator {
    /// Start a game from `position`
    ///
    /// A position that is already checkmate or stalemate starts the game in
    /// its terminal state.
    pub fn new(position: Position, clock_mode: ClockMode, ai_color: Option<Color>) -> Self {
        let mut record = GameRecord {
            log: MoveLog::new(position.to_fen()),
            position,
            game_over: GameOverState::Playing,
            clock: GameClock::new(clock_mode),
            last_move: None,
            version: 0,
            epoch: 0,
        };
        let status = game_status(&record.position);
        record.finish(GameOverState::from_status(status));

        let (notifier, _) = watch::channel(record.change());
        Self {
            record: RwLock::new(record),
            notifier,
            ai_color,
        }
    }

    /// Side played by the engine, if any.
    pub fn ai_color(&self) -> Option<Color> {
        self.ai_color
    }

    fn publish(&self, change: StateChange) {
        self.notifier.send_replace(change);
    }

    /// Receiver woken after every state change
    pub fn subscribe(&self) -> watch::Receiver<StateChange> {
        self.notifier.subscribe()
    }

    /// Consistent read of everything the front-end and workers need
    pub fn snapshot(&self) -> GameSnapshot {
        let record = self.record.read();
        let mut log = Vec::with_capacity(record.log.len() + 1);
        log.push(record.log.initial().to_string());
        log.extend(record.log.entries().iter().cloned());
        GameSnapshot {
            version: record.version,
            epoch: record.epoch,
            position: record.position.clone(),
            fen: record.log.latest().to_string(),
            ply: record.log.len(),
            game_over: record.game_over,
            clock_mode: record.clock.mode(),
            clock_state: record.clock.state(),
            white_clock: record.clock.display(Color::White),
            black_clock: record.clock.display(Color::Black),
            last_move: record.last_move.clone(),
            log,
        }
    }

    pub fn position(&self) -> Position {
        self.record.read().position.clone()
    }


    pub fn is_game_over(&self) -> bool {
        self.record.read().game_over.is_game_over()
    }

    /// Legal destinations of the piece on `square`, empty once the game is over.
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        let record = self.record.read();
        if record.game_over.is_game_over() {
            return Vec::new();
        }
        legal_destinations(&record.position, square)
    }

    /// Apply a move from `source`
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] after the game has ended
    /// - [`GameError::ClockExpired`] when the mover's time ran out first
    /// - [`GameError::NotYourTurn`] when a human moves for the engine's side
    /// - [`GameError::Engine`] for any rules violation
    pub fn apply_move(&self, mv: Move, source: MoveSource) -> GameResult<MoveOutcome> {
        self.apply_under_lock(source, None, |_| Ok(mv))
    }

    /// Apply a move computed against the position at `expected`
    ///
    /// # Errors
    ///
    /// As [`GameCoordinator::apply_move`], plus [`GameError::StaleMove`] when
    /// a ply was played or the position was replaced since `expected`.
    pub fn apply_move_at(
        &self,
        mv: Move,
        source: MoveSource,
        expected: MoveStamp,
    ) -> GameResult<MoveOutcome> {
        self.apply_under_lock(source, Some(expected), |_| Ok(mv))
    }

    /// Validate, choose and commit a move under one write lock.
    ///
    /// `choose` sees the record after the game-over, clock and stamp checks
    /// and picks the move to play on exactly that position.
    fn apply_under_lock(
        &self,
        source: MoveSource,
        expected: Option<MoveStamp>,
        choose: impl FnOnce(&GameRecord) -> GameResult<Move>,
    ) -> GameResult<MoveOutcome> {
        let now = Instant::now();
        let mut record = self.record.write();

        if record.game_over.is_game_over() {
            return Err(GameError::GameOver {
                announcement: record.game_over.message().to_string(),
            });
        }

        if let Some(loser) = record.clock.tick(now) {
            record.finish(GameOverState::on_time(loser));
            record.version += 1;
            let change = record.change();
            drop(record);
            self.publish(change);
            return Err(GameError::ClockExpired { loser });
        }

        if let Some(expected) = expected {
            let actual = record.stamp();
            if expected != actual {
                return Err(GameError::StaleMove { expected, actual });
            }
        }

        let mover = record.position.side_to_move;
        if source == MoveSource::Human && self.ai_color == Some(mover) {
            return Err(GameError::NotYourTurn { color: mover });
        }

        let mv = choose(&record)?;
        let next = apply_move(&record.position, mv)?;
        let outcome = commit(&mut record, next, mv, now);
        let change = record.change();
        drop(record);

        debug!("[TURN] {:?} played {} ({} to move next)", source, mv, mover.opposite());
        self.publish(change);
        Ok(outcome)
    }

    /// Accept a position proposed by the network peer
    ///
    /// The peer always plays White: the proposal is accepted only when White
    /// is to move locally and exactly one legal White move turns the current
    /// position into the proposed one. The move is inferred and played under
    /// the same write lock, so it always applies to the position it was
    /// inferred from.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidRemotePosition`] for unparsable or unreachable positions
    /// - [`GameError::NotYourTurn`] when it is not White's move, or White is the engine's
    /// - anything [`GameCoordinator::apply_move`] returns
    pub fn apply_remote_position(&self, fen: &str) -> GameResult<MoveOutcome> {
        let proposed = parse_fen(fen).map_err(|e| GameError::InvalidRemotePosition {
            reason: e.to_string(),
        })?;

        self.apply_under_lock(MoveSource::Remote, None, |record| {
            if record.position.side_to_move != Color::White || self.ai_color == Some(Color::White) {
                return Err(GameError::NotYourTurn {
                    color: record.position.side_to_move,
                });
            }
            infer_move(&record.position, &proposed).ok_or_else(|| {
                GameError::InvalidRemotePosition {
                    reason: "not reachable by one legal White move".to_string(),
                }
            })
        })
    }

    /// Replace the position wholesale (manual FEN load)
    ///
    /// Resets the move log to the new position and the clock to idle in the
    /// current mode. A terminal position ends the game immediately.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] once the game has ended; engine
    /// `MalformedPosition` for unparsable text.
    pub fn replace_position(&self, fen: &str) -> GameResult<GameOverState> {
        let position = load_game(fen)?;
        let mut record = self.record.write();
        if record.game_over.is_game_over() {
            return Err(GameError::GameOver {
                announcement: record.game_over.message().to_string(),
            });
        }
        if !record.log.is_empty() {
            debug!("[TURN] Discarding {} logged plies", record.log.len());
        }

        let status = game_status(&position);
        record.log = MoveLog::new(position.to_fen());
        record.position = position;
        record.clock = GameClock::new(record.clock.mode());
        record.last_move = None;
        record.epoch += 1;
        record.version += 1;
        record.finish(GameOverState::from_status(status));

        let game_over = record.game_over;
        let change = record.change();
        drop(record);

        info!("[TURN] Position replaced, epoch {}", change.epoch);
        self.publish(change);
        Ok(game_over)
    }

    /// Switch the clock to a new mode
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] once the game has ended.
    pub fn set_clock_mode(&self, mode: ClockMode) -> GameResult<()> {
        let mut record = self.record.write();
        if record.game_over.is_game_over() {
            return Err(GameError::GameOver {
                announcement: record.game_over.message().to_string(),
            });
        }
        record.clock.set_mode(mode, Instant::now())?;
        record.version += 1;
        let change = record.change();
        drop(record);

        info!("[CLOCK] Mode set to {}", mode);
        self.publish(change);
        Ok(())
    }

    /// Advance the clock to `now`
    ///
    /// Returns the new game-over state on the tick that runs a side out of
    /// time; `None` otherwise, including every tick after the game ended.
    pub fn tick_clock(&self, now: Instant) -> Option<GameOverState> {
        let mut record = self.record.write();
        if record.game_over.is_game_over() {
            return None;
        }
        let loser = record.clock.tick(now)?;
        let state = GameOverState::on_time(loser);
        record.finish(state);
        record.version += 1;
        let change = record.change();
        drop(record);

        warn!("[CLOCK] {} ran out of time", loser);
        self.publish(change);
        Some(state)
    }

    /// Clock display strings, White first.
    pub fn clock_display(&self) -> (String, String) {
        let record = self.record.read();
        (
            record.clock.display(Color::White),
            record.clock.display(Color::Black),
        )
    }

    /// Coordinate notation of the last ply, `"Unknown Move"` if unexplained.
    pub fn last_move(&self) -> Option<String> {
        self.record.read().last_move.clone()
    }

    /// Game-over announcement, `None` while the game is in progress.
    pub fn announcement(&self) -> Option<&'static str> {
        let game_over = self.record.read().game_over;
        game_over.is_game_over().then(|| game_over.message())
    }
}

/// Commit an already validated position under the write lock.
fn commit(record: &mut GameRecord, next: Position, mv: Move, now: Instant) -> MoveOutcome {
    let mover = record.position.side_to_move;
    let fen = next.to_fen();
    let status = game_status(&next);

    record.position = next;
    record.log.push(fen.clone());
    record.last_move = record.log.last_move_text();
    record.version += 1;

    if let Some(loser) = record.clock.on_move(mover, now) {
        record.finish(GameOverState::on_time(loser));
    }
    if status != GameStatus::Ongoing {
        record.finish(GameOverState::from_status(status));
    }

    MoveOutcome {
        mv,
        mover,
        fen,
        ply: record.log.len(),
        game_over: record.game_over,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::ChessEngineError;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn two_humans() -> GameCoordinator {
        GameCoordinator::new(Position::starting(), ClockMode::Untimed, None)
    }

    #[test]
    fn test_moves_alternate_and_are_logged() {
        let game = two_humans();
        let first = game.apply_move(mv("e2e4"), MoveSource::Human).unwrap();
        assert_eq!(first.mover, Color::White);
        assert_eq!(first.ply, 1);

        game.apply_move(mv("e7e5"), MoveSource::Human).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.ply, 2);
        assert_eq!(snapshot.log.len(), 3);
        assert_eq!(snapshot.side_to_move(), Color::White);
        assert_eq!(snapshot.fen, snapshot.position.to_fen());
        assert_eq!(snapshot.log.last(), Some(&snapshot.fen));
        assert_eq!(game.last_move().as_deref(), Some("e7e5"));
    }

    #[test]
    fn test_illegal_move_leaves_state_untouched() {
        let game = two_humans();
        let before = game.snapshot();
        let err = game.apply_move(mv("e2e5"), MoveSource::Human).unwrap_err();
        assert!(matches!(err, GameError::Engine(ChessEngineError::IllegalMove { .. })));

        let after = game.snapshot();
        assert_eq!(after.position, before.position);
        assert_eq!(after.version, before.version);
    }

    #[test]
    fn test_human_cannot_move_for_engine() {
        let game = GameCoordinator::new(Position::starting(), ClockMode::Untimed, Some(Color::White));
        assert!(matches!(
            game.apply_move(mv("e2e4"), MoveSource::Human),
            Err(GameError::NotYourTurn { color: Color::White })
        ));
        assert!(game.apply_move(mv("e2e4"), MoveSource::Engine).is_ok());
    }

    #[test]
    fn test_stale_engine_move_rejected() {
        let game = two_humans();
        game.apply_move(mv("e2e4"), MoveSource::Human).unwrap();
        assert!(matches!(
            game.apply_move_at(mv("e7e5"), MoveSource::Engine, MoveStamp { epoch: 0, ply: 0 }),
            Err(GameError::StaleMove { actual: MoveStamp { epoch: 0, ply: 1 }, .. })
        ));
        let current = game.snapshot().stamp();
        assert!(game.apply_move_at(mv("e7e5"), MoveSource::Engine, current).is_ok());
    }

    #[test]
    fn test_move_from_previous_epoch_rejected() {
        //! A search result from before a position load must not be played on
        //! the loaded position, even at the same ply count.

        let game = two_humans();
        let searched_at = game.snapshot().stamp();
        game.replace_position("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();

        let err = game
            .apply_move_at(mv("e2e4"), MoveSource::Engine, searched_at)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::StaleMove {
                expected: MoveStamp { epoch: 0, ply: 0 },
                actual: MoveStamp { epoch: 1, ply: 0 },
            }
        );
        assert_eq!(game.snapshot().fen, "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(game.snapshot().ply, 0);
    }

    #[test]
    fn test_remote_move_inferred_against_current_board() {
        //! A proposal built from an earlier board is matched against the board
        //! at the time it is applied, not the one the peer saw.

        let game = two_humans();
        let proposed = apply_move(&Position::starting(), mv("d2d4")).unwrap().to_fen();
        let loaded = "rnbqkbnr/pppppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 1";
        game.replace_position(loaded).unwrap();

        assert!(matches!(
            game.apply_remote_position(&proposed),
            Err(GameError::InvalidRemotePosition { .. })
        ));
        assert_eq!(game.snapshot().fen, loaded);
        assert_eq!(game.snapshot().ply, 0);
    }

    #[test]
    fn test_checkmate_ends_game() {
        let game = two_humans();
        for text in ["f2f3", "e7e5", "g2g4"] {
            game.apply_move(mv(text), MoveSource::Human).unwrap();
        }
        let outcome = game.apply_move(mv("d8h4"), MoveSource::Human).unwrap();
        assert_eq!(outcome.game_over, GameOverState::BlackWon);
        assert_eq!(game.announcement(), Some("Black wins by checkmate!"));
        assert!(matches!(
            game.apply_move(mv("a2a3"), MoveSource::Human),
            Err(GameError::GameOver { .. })
        ));
        assert!(game.legal_destinations("a2".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_replace_position_resets_log() {
        let game = two_humans();
        game.apply_move(mv("e2e4"), MoveSource::Human).unwrap();
        let state = game
            .replace_position("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")
            .unwrap();
        assert_eq!(state, GameOverState::Playing);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.ply, 0);
        assert_eq!(snapshot.epoch, 1);
        assert_eq!(snapshot.last_move, None);
    }

    #[test]
    fn test_replace_with_terminal_position_ends_game() {
        let game = two_humans();
        let state = game.replace_position("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(state, GameOverState::Stalemate);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_malformed_replacement_is_rejected() {
        let game = two_humans();
        assert!(matches!(
            game.replace_position("rubbish"),
            Err(GameError::Engine(ChessEngineError::MalformedPosition { .. }))
        ));
        assert_eq!(game.snapshot().epoch, 0);
    }

    #[test]
    fn test_remote_position_applies_inferred_move() {
        let game = two_humans();
        let proposed = apply_move(&Position::starting(), mv("d2d4")).unwrap().to_fen();
        let outcome = game.apply_remote_position(&proposed).unwrap();
        assert_eq!(outcome.mv, mv("d2d4"));
        assert_eq!(game.position().to_fen(), proposed);
    }

    #[test]
    fn test_remote_position_rejections() {
        let game = two_humans();
        assert!(matches!(
            game.apply_remote_position("not a fen"),
            Err(GameError::InvalidRemotePosition { .. })
        ));
        assert!(matches!(
            game.apply_remote_position("4k3/8/8/8/8/8/8/4K3 b - - 0 1"),
            Err(GameError::InvalidRemotePosition { .. })
        ));

        game.apply_move(mv("e2e4"), MoveSource::Human).unwrap();
        let black_reply = apply_move(&game.position(), mv("e7e5")).unwrap().to_fen();
        assert!(matches!(
            game.apply_remote_position(&black_reply),
            Err(GameError::NotYourTurn { color: Color::Black })
        ));
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let game = two_humans();
        let mut changes = game.subscribe();
        assert!(!changes.has_changed().unwrap());

        game.apply_move(mv("g1f3"), MoveSource::Human).unwrap();
        assert!(changes.has_changed().unwrap());
        let change = *changes.borrow_and_update();
        assert_eq!(change.ply, 1);
        assert_eq!(change.version, 1);
    }

    #[test]
    fn test_clock_mode_change_after_game_over_rejected() {
        let game = two_humans();
        game.replace_position("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.set_clock_mode(ClockMode::FIVE_MINUTES).is_err());
    }
}
