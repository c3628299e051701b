//! Line-oriented command loop around a [`Game`].

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use crate::game::{Game, MoveReport};
use crate::types::{Color, Winner};

pub const DEFAULT_AUTOSAVE_FILE: &str = "autosave.oth";

const HELP: &str = "\
Available commands:
  new                 - Start a new game
  place <position>    - Place a piece (e.g., place D4)
  undo                - Undo the last move
  redo                - Redo an undone move
  save <filename>     - Save game to file
  load <filename>     - Load game from file
  help                - Show this help message
  exit                - Exit the game

Position format: Column (A-H) + Row (1-8), e.g., D4, E3
";

/// Session settings chosen on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where to write the game after every state change, if anywhere.
    pub autosave: Option<PathBuf>,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Place(String),
    Undo,
    Redo,
    Save(String),
    Load(String),
    Help,
    Exit,
    /// A keyword that needs an argument was given none.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Parses a trimmed, non-empty line. Keywords are case-sensitive.
    pub fn parse(line: &str) -> Self {
        let (keyword, arg) = match line.split_once(char::is_whitespace) {
            Some((keyword, arg)) => (keyword, arg.trim()),
            None => (line, ""),
        };

        match (keyword, arg.is_empty()) {
            ("new", true) => Self::New,
            ("undo", true) => Self::Undo,
            ("redo", true) => Self::Redo,
            ("help", true) => Self::Help,
            ("exit", true) => Self::Exit,
            ("place", false) => Self::Place(arg.to_string()),
            ("save", false) => Self::Save(arg.to_string()),
            ("load", false) => Self::Load(arg.to_string()),
            ("place", true) => Self::Usage("Usage: place <position> (e.g., place D4)"),
            ("save", true) => Self::Usage("Usage: save <filename> (e.g., save game.oth)"),
            ("load", true) => Self::Usage("Usage: load <filename> (e.g., load game.oth)"),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    game: Game,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            game: Game::new(),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Reads commands until `exit` or end of input. Undecodable bytes in a
    /// line are replaced, so a bad line is reported like any unknown command.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "=== Welcome to Othello/Reversi ===")?;
        writeln!(out, "Type 'help' for available commands")?;
        writeln!(out)?;
        self.write_status(out)?;

        let mut buf = Vec::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    writeln!(out)?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "input closed");
                    writeln!(out)?;
                    return Ok(());
                }
            }

            let line = String::from_utf8_lossy(&buf);
            if self.execute(&line, out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Runs one input line and writes its output. Game errors are printed,
    /// never returned; only writer failures are.
    #[instrument(skip(self, out))]
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = Command::parse(line);
        debug!(?command, "dispatching");

        let outcome = match command {
            Command::Exit => {
                writeln!(out, "Thanks for playing Othello!")?;
                return Ok(Flow::Exit);
            }
            Command::Help => {
                writeln!(out)?;
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Usage(usage) => {
                writeln!(out, "{usage}")?;
                return Ok(Flow::Continue);
            }
            Command::Unknown(_) => {
                writeln!(out, "Unknown command. Type 'help' for available commands.")?;
                return Ok(Flow::Continue);
            }
            Command::New => {
                self.game.new_game();
                Ok(("New game started".to_string(), true))
            }
            Command::Place(input) => {
                self.game.place(&input).map(|report| (move_message(&report), true))
            }
            Command::Undo => self.game.undo().map(|()| ("Move undone.".to_string(), true)),
            Command::Redo => self.game.redo().map(|()| ("Move redone.".to_string(), true)),
            Command::Save(file) => {
                let saved = self.game.save(&file);
                saved.map(|()| (format!("Game saved to {file}"), false))
            }
            Command::Load(file) => {
                let loaded = self.game.load(&file);
                loaded.map(|()| (format!("Game loaded from {file}"), true))
            }
        };

        match outcome {
            Ok((message, redraw)) => {
                writeln!(out, "{message}")?;
                if redraw {
                    self.autosave();
                    self.write_status(out)?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    /// Board, then either the side to move or the final result, then the score.
    pub fn write_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.game.board())?;
        match self.game.winner() {
            Some(Winner::Tie) => {
                write_score(out, &self.game)?;
                writeln!(out, "Game was equal.")
            }
            Some(winner) => {
                write_score(out, &self.game)?;
                writeln!(out, "Winner: {}", winner.color_name().unwrap_or_default())
            }
            None => {
                writeln!(out, "Player Turn: {}", self.game.current_player().symbol())?;
                write_score(out, &self.game)
            }
        }
    }

    fn autosave(&self) {
        let Some(path) = &self.config.autosave else {
            return;
        };
        if let Err(err) = self.game.save(path) {
            warn!(%err, "autosave failed");
        }
    }
}

fn move_message(report: &MoveReport) -> String {
    let mut lines = vec![format!("Piece placed at {}", report.position)];
    lines.extend(report.skipped.iter().map(|&color| skip_message(color)));
    lines.join("\n")
}

fn write_score<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    let (black, white) = game.board().score();
    writeln!(out, "Score - B: {black} | W: {white}")
}

pub fn skip_message(color: Color) -> String {
    let symbol = color.symbol();
    format!("Player {symbol} has no valid moves. Turn skipped.")
}
