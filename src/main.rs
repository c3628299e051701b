//! Terminal front end: reads commands from stdin, writes the game to stdout.

use std::io;

use clap::Parser;
use othello::cli::Cli;
use othello::session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::new(cli.session_config());
    let mut stdout = io::stdout().lock();

    if let Some(path) = &cli.load
        && let Err(err) = session.game_mut().load(path)
    {
        eprintln!("{err}");
    }

    info!(autosave = ?cli.autosave, "starting session");
    session.run(io::stdin().lock(), &mut stdout)
}
