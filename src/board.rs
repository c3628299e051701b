use std::fmt;

use crate::types::{BOARD_SIZE, Cell, Color, Position};

/// Scan order: N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Reversi board state: an 8x8 row-major grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        grid[3][3] = Cell::White;
        grid[3][4] = Cell::Black;
        grid[4][3] = Cell::Black;
        grid[4][4] = Cell::White;
        Self { grid }
    }

    /// Puts the board back to the opening layout.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        in_bounds(row, col)
    }

    /// Returns false for out-of-range coordinates.
    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(Cell::Empty)
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.get(pos.row as i32, pos.col as i32)
    }

    /// Opponent stones captured by `color` playing at `pos`, grouped by
    /// direction in scan order. Empty when the move captures nothing.
    pub fn flipped_pieces(&self, pos: Position, color: Color) -> Vec<Position> {
        let me = Cell::from(color);
        let opp = Cell::from(!color);
        let (row, col) = (pos.row as i32, pos.col as i32);
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = Vec::new();

            while self.get(r, c) == Some(opp) {
                line.push(Position {
                    row: r as u8,
                    col: c as u8,
                });
                r += dr;
                c += dc;
            }

            if !line.is_empty() && self.get(r, c) == Some(me) {
                flips.extend(line);
            }
        }

        flips
    }

    pub fn is_valid_move(&self, pos: Position, color: Color) -> bool {
        self.is_empty(pos.row as i32, pos.col as i32) && !self.flipped_pieces(pos, color).is_empty()
    }

    /// All legal moves for `color` in row-major order.
    pub fn valid_moves(&self, color: Color) -> Vec<Position> {
        all_positions()
            .filter(|&pos| self.is_valid_move(pos, color))
            .collect()
    }

    pub fn has_valid_moves(&self, color: Color) -> bool {
        all_positions().any(|pos| self.is_valid_move(pos, color))
    }

    /// Places one stone and flips captured stones.
    /// Returns false and leaves the board untouched when the move is illegal.
    pub fn place_piece(&mut self, pos: Position, color: Color) -> bool {
        if !self.is_valid_move(pos, color) {
            return false;
        }

        let flips = self.flipped_pieces(pos, color);
        self.grid[pos.row as usize][pos.col as usize] = Cell::from(color);
        for flip in flips {
            let cell = &mut self.grid[flip.row as usize][flip.col as usize];
            *cell = cell.flipped();
        }

        true
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u32, u32) {
        self.grid
            .iter()
            .flatten()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; BOARD_SIZE * BOARD_SIZE] {
        let mut out = [0u8; BOARD_SIZE * BOARD_SIZE];
        for (slot, cell) in out.iter_mut().zip(self.grid.iter().flatten()) {
            *slot = match cell {
                Cell::Empty => 0,
                Cell::Black => 1,
                Cell::White => 2,
            };
        }
        out
    }

    /// Eight lines of eight `.`/`B`/`W` characters, each newline-terminated.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for row in &self.grid {
            out.extend(row.iter().map(|cell| cell.symbol()));
            out.push('\n');
        }
        out
    }

    /// Overwrites cells from text produced by [`Board::to_text`].
    ///
    /// Lossy: rows or columns missing from `data` keep their current
    /// contents, and unknown characters read as empty.
    pub fn read_text(&mut self, data: &str) {
        for (row, line) in self.grid.iter_mut().zip(data.lines()) {
            for (cell, symbol) in row.iter_mut().zip(line.chars()) {
                *cell = Cell::from_symbol(symbol);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        };
        board.read_text(&rows.join("\n"));
        board
    }

    fn get(&self, row: i32, col: i32) -> Option<Cell> {
        in_bounds(row, col).then(|| self.grid[row as usize][col as usize])
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for (i, row) in self.grid.iter().enumerate() {
            write!(f, "{}", i + 1)?;
            for cell in row {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn all_positions() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE * BOARD_SIZE).filter_map(|i| Position::new(i / BOARD_SIZE, i % BOARD_SIZE))
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
