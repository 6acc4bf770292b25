//! Console front-end
//!
//! A line-oriented stand-in for a graphical board: shows the position,
//! lists legal destinations, accepts moves in coordinate notation, loads FEN
//! positions and switches the clock. Status updates from the reporter are
//! printed as they arrive.
//!
//! # Commands
//!
//! | Command          | Effect                                         |
//! |------------------|------------------------------------------------|
//! | `move e2e4`      | Play a move (asks for a piece when promoting)  |
//! | `moves e2`       | Legal destinations of the piece on e2          |
//! | `fen <FEN>`      | Replace the position                           |
//! | `clock 10min`    | Switch the clock mode                          |
//! | `show`           | Board and clocks                               |
//! | `status`         | Turn, clocks, last move and result             |
//! | `help`, `quit`   |                                                |

use std::sync::Arc;

use chess_engine::{ChessEngineError, Move, PieceKind, Square};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::mpsc;

use crate::game::{ClockMode, GameCoordinator, GameError, MoveSource, StatusUpdate};

const HELP: &str = "\
Commands:
  move <uci>     play a move, e.g. move e2e4 or move e7e8q
  moves <square> list legal destinations of a piece
  fen <FEN>      load a position
  clock <mode>   untimed, 5min, 10min, 10min_increment, N or N+inc
  show           print the board and clocks
  status         print turn, clocks, last move and result
  help           print this help
  quit           leave the game";

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Moves(Square),
    Fen(String),
    Clock(ClockMode),
    Show,
    Status,
    Help,
    Quit,
}

/// Parse one input line
///
/// A bare coordinate move such as `e2e4` is accepted as `move e2e4`.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "move" | "m" => rest
            .parse::<Move>()
            .map(Command::Move)
            .map_err(|e| e.to_string()),
        "moves" => rest
            .parse::<Square>()
            .map(Command::Moves)
            .map_err(|e| e.to_string()),
        "fen" if !rest.is_empty() => Ok(Command::Fen(rest.to_string())),
        "clock" => rest
            .parse::<ClockMode>()
            .map(Command::Clock)
            .map_err(|e| e.to_string()),
        "show" | "board" => Ok(Command::Show),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => match line.parse::<Move>() {
            Ok(mv) => Ok(Command::Move(mv)),
            Err(_) => Err(format!("Unknown command {line:?}, type help")),
        },
    }
}

pub struct Console<R, W> {
    coordinator: Arc<GameCoordinator>,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(coordinator: Arc<GameCoordinator>, input: R, out: W) -> Self {
        Self {
            coordinator,
            lines: input.lines(),
            out,
        }
    }

    /// Serve commands until `quit` or end of input
    pub async fn run(mut self, mut updates: mpsc::UnboundedReceiver<StatusUpdate>) -> std::io::Result<W> {
        self.say(HELP).await?;
        self.show().await?;
        let mut updates_open = true;

        loop {
            tokio::select! {
                line = self.lines.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if !self.handle_line(&line).await? {
                        break;
                    }
                }
                update = updates.recv(), if updates_open => match update {
                    Some(update) => self.say(&format!("» {update}")).await?,
                    None => updates_open = false,
                },
            }
        }
        self.out.flush().await?;
        Ok(self.out)
    }

    /// Execute one line; `false` means quit.
    pub async fn handle_line(&mut self, line: &str) -> std::io::Result<bool> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                self.say(&message).await?;
                return Ok(true);
            }
        };

        match command {
            Command::Move(mv) => self.play(mv).await?,
            Command::Moves(square) => {
                let targets = self.coordinator.legal_destinations(square);
                if targets.is_empty() {
                    self.say(&format!("{square}: no legal moves")).await?;
                } else {
                    let list: Vec<String> = targets.iter().map(Square::to_string).collect();
                    self.say(&format!("{square}: {}", list.join(" "))).await?;
                }
            }
            Command::Fen(fen) => match self.coordinator.replace_position(&fen) {
                Ok(_) => self.show().await?,
                Err(e) => self.say(&format!("Error: {e}")).await?,
            },
            Command::Clock(mode) => match self.coordinator.set_clock_mode(mode) {
                Ok(()) => self.say(&format!("Clock set to {mode}")).await?,
                Err(e) => self.say(&format!("Error: {e}")).await?,
            },
            Command::Show => self.show().await?,
            Command::Status => self.status().await?,
            Command::Help => self.say(HELP).await?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn play(&mut self, mv: Move) -> std::io::Result<()> {
        let mut mv = mv;
        loop {
            match self.coordinator.apply_move(mv, MoveSource::Human) {
                Ok(outcome) => {
                    self.say(&format!("Played {}", outcome.mv)).await?;
                    return self.show().await;
                }
                Err(GameError::Engine(ChessEngineError::PromotionRequired { .. })) => {
                    match self.ask_promotion().await? {
                        Some(kind) => mv = Move::with_promotion(mv.from, mv.to, kind),
                        None => return self.say("Move cancelled").await,
                    }
                }
                Err(e) => return self.say(&format!("Error: {e}")).await,
            }
        }
    }

    /// Ask until a valid piece letter is given; `None` on end of input.
    async fn ask_promotion(&mut self) -> std::io::Result<Option<PieceKind>> {
        loop {
            self.prompt("Promote to (q/r/b/n): ").await?;
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            let choice = line
                .trim()
                .chars()
                .next()
                .and_then(PieceKind::from_letter)
                .filter(|kind| kind.is_promotion_target());
            if choice.is_some() {
                return Ok(choice);
            }
        }
    }

    async fn show(&mut self) -> std::io::Result<()> {
        let snapshot = self.coordinator.snapshot();
        self.say(&format!(
            "{}\nWhite {}  Black {}",
            snapshot.position, snapshot.white_clock, snapshot.black_clock
        ))
        .await
    }

    async fn status(&mut self) -> std::io::Result<()> {
        let snapshot = self.coordinator.snapshot();
        let mut text = format!(
            "FEN: {}\nPly {} | clock {} | White {} Black {}\nLast move: {}",
            snapshot.fen,
            snapshot.ply,
            snapshot.clock_mode,
            snapshot.white_clock,
            snapshot.black_clock,
            snapshot.last_move.as_deref().unwrap_or("-"),
        );
        if snapshot.game_over.is_game_over() {
            text.push_str(&format!("\n{}", snapshot.game_over.message()));
        } else {
            text.push_str(&format!("\n{} to move", snapshot.side_to_move()));
        }
        self.say(&text).await
    }

    async fn prompt(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }
}
