//! Errors reported at the command boundary.

use std::path::PathBuf;

use derive_more::{Display, Error};

use crate::types::Position;

/// Every failure a game operation can report. None of them end the session.
#[derive(Debug, Display, Error)]
pub enum GameError {
    /// Coordinate is not a column letter A-H followed by a row digit 1-8.
    #[display("Invalid position format '{input}'. Use format like D4")]
    Format { input: String },

    /// Target is occupied or captures nothing.
    #[display("Invalid move at {position}. You must flip at least one opponent piece")]
    IllegalMove { position: Position },

    #[display("Game has ended. Start a new game to continue playing")]
    GameOver,

    #[display("No moves to undo")]
    NothingToUndo,

    #[display("No moves to redo")]
    NothingToRedo,

    /// A save or load file could not be opened.
    #[display("Cannot open file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
