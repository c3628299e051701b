//! Plain-text save format.
//!
//! ```text
//! ........   (8 board lines)
//! Turn: B
//! Score: 2 2
//! GameEnded: 0
//! Winner: Black   (only when ended with a winner)
//! ```

use std::fmt;

use crate::board::Board;
use crate::types::{BOARD_SIZE, Color, Winner};

/// Contents of a save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub board: Board,
    pub turn: Color,
    pub black_score: u32,
    pub white_score: u32,
    /// `Some` when the game had ended.
    pub result: Option<Winner>,
}

impl SavedGame {
    /// Best-effort parse: missing or malformed lines fall back to defaults
    /// instead of failing.
    ///
    /// Board lines overwrite an opening board, a `Turn:` other than `B` means
    /// white, unreadable scores are 0, and an ended game without a `Winner:`
    /// line is a tie.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines();

        let board_text: Vec<&str> = lines.by_ref().take(BOARD_SIZE).collect();
        let mut board = Board::new();
        board.read_text(&board_text.join("\n"));

        let turn_line = lines.next().unwrap_or_default();
        let turn = if turn_line.contains("Turn: B") {
            Color::Black
        } else {
            Color::White
        };

        let mut scores = lines
            .next()
            .and_then(|line| line.strip_prefix("Score:"))
            .unwrap_or_default()
            .split_whitespace()
            .map(|n| n.parse::<u32>().unwrap_or(0));
        let black_score = scores.next().unwrap_or(0);
        let white_score = scores.next().unwrap_or(0);

        let ended = lines.next().is_some_and(|line| line.contains('1'));
        let winner = lines
            .next()
            .and_then(|line| line.strip_prefix("Winner:"))
            .map(str::trim);
        let result = ended.then_some(match winner {
            Some("Black") => Winner::Black,
            Some("White") => Winner::White,
            _ => Winner::Tie,
        });

        Self {
            board,
            turn,
            black_score,
            white_score,
            result,
        }
    }
}

impl fmt::Display for SavedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board.to_text())?;
        writeln!(f, "Turn: {}", self.turn.symbol())?;
        writeln!(f, "Score: {} {}", self.black_score, self.white_score)?;
        writeln!(f, "GameEnded: {}", u8::from(self.result.is_some()))?;
        if let Some(name) = self.result.and_then(Winner::color_name) {
            writeln!(f, "Winner: {name}")?;
        }
        Ok(())
    }
}
