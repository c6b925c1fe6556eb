//! kfchess - command line tools for the Kung Fu Chess engine
//!
//! - `play` runs a game in the terminal, one command per line
//! - `simulate` pits two bots against each other and can save the replay
//! - `replay` rebuilds a saved game and prints how it ended

mod cli;
mod play;
mod replay;
mod simulate;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play(args) => play::run(args),
        Command::Simulate(args) => simulate::run(args),
        Command::Replay(args) => replay::run(args),
    }
}
