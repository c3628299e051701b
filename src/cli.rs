//! Command-line interface for the terminal game.

use std::path::PathBuf;

use clap::Parser;

use crate::session::{DEFAULT_AUTOSAVE_FILE, SessionConfig};

/// Othello/Reversi for two players at one terminal.
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(about = "Two-player Othello/Reversi in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Start from a saved game instead of the opening position
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Write the game to FILE after every change
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_AUTOSAVE_FILE
    )]
    pub autosave: Option<PathBuf>,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            autosave: self.autosave.clone(),
        }
    }
}
