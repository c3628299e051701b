use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::error::GameError;
use crate::history::{GameSnapshot, History};
use crate::persist::SavedGame;
use crate::types::{Color, GameView, Position, Winner};

/// One side and its cached stone count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    color: Color,
    score: u32,
}

impl Player {
    fn new(color: Color) -> Self {
        Self { color, score: 0 }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Ended(Winner),
}

/// What a successful placement did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub color: Color,
    pub position: Position,
    pub flipped: Vec<Position>,
    /// Sides that had to pass afterwards, in the order they were skipped.
    pub skipped: Vec<Color>,
}

/// A game session: board, both players, side to move and undo history.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    current: Color,
    history: History,
    status: GameStatus,
}

impl Game {
    /// Creates a game already set up at the opening position.
    pub fn new() -> Self {
        let mut game = Self {
            board: Board::new(),
            players: [Player::new(Color::Black), Player::new(Color::White)],
            current: Color::Black,
            history: History::new(),
            status: GameStatus::InProgress,
        };
        game.new_game();
        game
    }

    /// Resets board, players and history to the opening position.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board.reset();
        self.current = Color::Black;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.save_game_state();
        info!("new game started");
    }

    /// Parses `input` ("D4") and plays it for the side to move.
    pub fn place(&mut self, input: &str) -> Result<MoveReport, GameError> {
        if self.is_ended() {
            return Err(GameError::GameOver);
        }
        let position = input.parse::<Position>()?;
        self.play(position)
    }

    #[instrument(skip(self), fields(player = ?self.current))]
    pub fn play(&mut self, position: Position) -> Result<MoveReport, GameError> {
        if self.is_ended() {
            return Err(GameError::GameOver);
        }

        let color = self.current;
        let flipped = self.board.flipped_pieces(position, color);
        if !self.board.place_piece(position, color) {
            debug!(%position, "rejected illegal move");
            return Err(GameError::IllegalMove { position });
        }
        debug!(%position, flipped = flipped.len(), "piece placed");

        self.switch_turn();

        // With two players, two consecutive checks cover every forced pass.
        let mut skipped = Vec::new();
        if let Some(first) = self.handle_turn_skip() {
            skipped.push(first);
            skipped.extend(self.handle_turn_skip());
        }

        self.check_game_end();
        self.save_game_state();

        Ok(MoveReport {
            color,
            position,
            flipped,
            skipped,
        })
    }

    /// Steps back one snapshot. Always leaves the game in progress.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), GameError> {
        let snapshot = self
            .history
            .undo()
            .cloned()
            .ok_or(GameError::NothingToUndo)?;
        self.restore(&snapshot);
        self.status = GameStatus::InProgress;
        debug!(cursor = self.history.cursor(), "undo");
        Ok(())
    }

    /// Steps forward one snapshot and re-evaluates the end condition.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Result<(), GameError> {
        let snapshot = self
            .history
            .redo()
            .cloned()
            .ok_or(GameError::NothingToRedo)?;
        self.restore(&snapshot);
        self.status = GameStatus::InProgress;
        self.check_game_end();
        debug!(cursor = self.history.cursor(), "redo");
        Ok(())
    }

    /// Ends the game when neither side has a legal move.
    pub fn check_game_end(&mut self) {
        if self.board.has_valid_moves(self.current) || self.board.has_valid_moves(!self.current) {
            return;
        }

        self.update_scores();
        let winner = Winner::from_scores(
            self.player(Color::Black).score,
            self.player(Color::White).score,
        );
        self.status = GameStatus::Ended(winner);
        info!(?winner, "game ended");
    }

    /// Writes the save format to `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let path = path.as_ref();
        fs::write(path, self.to_saved().to_string()).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("game saved");
        Ok(())
    }

    /// Replaces the game with the contents of `path`. Nothing changes if the
    /// file cannot be read.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.restore_saved(SavedGame::parse(&String::from_utf8_lossy(&bytes)));
        info!("game loaded");
        Ok(())
    }

    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            board: self.board,
            turn: self.current,
            black_score: self.player(Color::Black).score,
            white_score: self.player(Color::White).score,
            result: self.winner(),
        }
    }

    /// Installs a loaded game as the single history entry.
    pub fn restore_saved(&mut self, saved: SavedGame) {
        self.board = saved.board;
        self.current = saved.turn;
        self.player_mut(Color::Black).score = saved.black_score;
        self.player_mut(Color::White).score = saved.white_score;
        self.status = match saved.result {
            Some(winner) => GameStatus::Ended(winner),
            None => GameStatus::InProgress,
        };
        self.history.clear();
        self.save_game_state();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::Ended(winner) => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> GameView {
        GameView {
            board: self.board.to_array().to_vec(),
            current_player: self.current,
            black_count: self.player(Color::Black).score,
            white_count: self.player(Color::White).score,
            is_game_over: self.is_ended(),
            winner: self.winner(),
            legal_moves: self.board.valid_moves(self.current),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        &mut self.players[color.index()]
    }

    fn switch_turn(&mut self) {
        self.current = !self.current;
    }

    /// Passes for the side to move if it is stuck. Returns who passed.
    fn handle_turn_skip(&mut self) -> Option<Color> {
        if self.board.has_valid_moves(self.current) {
            return None;
        }
        let stuck = self.current;
        debug!(player = ?stuck, "no valid moves, turn skipped");
        self.switch_turn();
        Some(stuck)
    }

    fn update_scores(&mut self) {
        let (black, white) = self.board.score();
        for player in &mut self.players {
            player.score = match player.color {
                Color::Black => black,
                Color::White => white,
            };
        }
    }

    fn save_game_state(&mut self) {
        self.update_scores();
        self.history.record(self.snapshot());
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_text(),
            turn: self.current,
            black_score: self.player(Color::Black).score,
            white_score: self.player(Color::White).score,
        }
    }

    fn restore(&mut self, snapshot: &GameSnapshot) {
        self.board.read_text(&snapshot.board);
        self.current = snapshot.turn;
        self.player_mut(Color::Black).score = snapshot.black_score;
        self.player_mut(Color::White).score = snapshot.white_score;
    }

    #[cfg(test)]
    pub(crate) fn set_board_for_test(&mut self, board: Board, current: Color) {
        self.board = board;
        self.current = current;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.save_game_state();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
