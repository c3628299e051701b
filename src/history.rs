//! Linear undo/redo over full game snapshots.

use crate::types::Color;

/// Board text, side to move and scores at one point of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: String,
    pub turn: Color,
    pub black_score: u32,
    pub white_score: u32,
}

/// Snapshots plus a cursor at the current one.
///
/// Recording while the cursor is behind the tail abandons the redo branch.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<GameSnapshot>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn record(&mut self, snapshot: GameSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Moves the cursor back one entry. `None` at the first snapshot.
    pub fn undo(&mut self) -> Option<&GameSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Moves the cursor forward one entry. `None` at the tail.
    pub fn redo(&mut self) -> Option<&GameSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&GameSnapshot> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
