use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GameError;

pub const BOARD_SIZE: usize = 8;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Single-letter tag used on the board and in save files.
    pub fn symbol(self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Black => 0,
            Self::White => 1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    /// Gets the opponent.
    fn not(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Content of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'B' => Self::Black,
            'W' => Self::White,
            _ => Self::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Black => 'B',
            Self::White => 'W',
        }
    }

    /// Toggles a stone to the other color. Empty stays empty.
    pub fn flipped(self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

/// Renders as column letter + row number ("D4").
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.col) as char;
        write!(f, "{col}{}", self.row + 1)
    }
}

/// Parses "D4"-style notation. The column letter is case-insensitive.
impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || GameError::Format {
            input: s.to_string(),
        };

        let mut chars = s.chars();
        let (Some(col), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format_error());
        };

        let col = "ABCDEFGH"
            .find(col.to_ascii_uppercase())
            .ok_or_else(format_error)?;
        let row = match row.to_digit(10) {
            Some(digit @ 1..=8) => digit as usize - 1,
            _ => return Err(format_error()),
        };

        Self::new(row, col).ok_or_else(format_error)
    }
}

/// Final result once neither side can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Tie,
}

impl Winner {
    pub fn from_scores(black: u32, white: u32) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Self::Black,
            std::cmp::Ordering::Less => Self::White,
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }

    /// Name written to the `Winner:` save line; a tie has none.
    pub fn color_name(self) -> Option<&'static str> {
        match self {
            Self::Black => Some(Color::Black.name()),
            Self::White => Some(Color::White.name()),
            Self::Tie => None,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Color,
    pub black_count: u32,
    pub white_count: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - `None` while the game is in progress.
    /// - `Some(Winner::Tie)` when the final counts are equal.
    pub winner: Option<Winner>,
    pub legal_moves: Vec<Position>,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive_notation() {
        for (input, row, col) in [("D4", 3, 3), ("c4", 3, 2), ("h8", 7, 7)] {
            let parsed = input.parse::<Position>().unwrap();
            assert_eq!(parsed, Position { row, col }, "{input}");
        }
    }

    #[test]
    fn rejects_malformed_notation() {
        for input in ["", "D", "D44", "I4", "D0", "D9", "4D", " D4"] {
            let err = input.parse::<Position>().unwrap_err();
            assert!(
                matches!(err, GameError::Format { .. }),
                "{input:?} should be a format error"
            );
        }
    }

    #[test]
    fn position_display_round_trips() {
        let pos = Position::new(2, 5).unwrap();
        assert_eq!(pos.to_string(), "F3");
        assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
        assert!(Position::new(8, 0).is_none());
    }

    #[test]
    fn winner_compares_scores() {
        assert_eq!(Winner::from_scores(40, 24), Winner::Black);
        assert_eq!(Winner::from_scores(1, 63), Winner::White);
        assert_eq!(Winner::from_scores(32, 32), Winner::Tie);
        assert_eq!(Winner::Tie.color_name(), None);
    }

    #[test]
    fn cell_flip_toggles_color() {
        assert_eq!(Cell::Black.flipped(), Cell::White);
        assert_eq!(Cell::White.flipped(), Cell::Black);
        assert_eq!(Cell::from_symbol('x'), Cell::Empty);
        assert_eq!(!Color::Black, Color::White);
    }
}
