//! Game lifecycle
//!
//! Functions for starting a game from the standard setup or from FEN text.

use tracing::info;

use crate::board::Position;
use crate::error::ChessEngineResult;
use crate::fen::parse_fen;

/// Create a new game with the standard starting position
pub fn new_game() -> Position {
    Position::starting()
}

/// Start a game from an arbitrary FEN position
///
/// # Errors
///
/// [`crate::ChessEngineError::MalformedPosition`] when the text does not parse.
pub fn load_game(fen: &str) -> ChessEngineResult<Position> {
    let position = parse_fen(fen)?;
    info!("[ENGINE] Loaded position, {} to move", position.side_to_move);
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STARTING_FEN;

    #[test]
    fn test_new_game_is_standard_setup() {
        assert_eq!(new_game().to_fen(), STARTING_FEN);
    }

    #[test]
    fn test_load_game_rejects_garbage() {
        assert!(load_game("not a fen").is_err());
        assert!(load_game(STARTING_FEN).is_ok());
    }
}
