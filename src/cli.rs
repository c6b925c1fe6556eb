//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kfchess_engine::{Difficulty, Speed};

#[derive(Parser, Debug)]
#[command(name = "kfchess", version, about = "Kung Fu Chess: chess without turns")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal (`T <n>` ticks, `M r1 c1 r2 c2` moves, `Q` quits)
    Play(PlayArgs),
    /// Let two bots play a game without a display
    Simulate(SimulateArgs),
    /// Rebuild a saved replay and report the result
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// standard or lightning
    #[arg(long, default_value = "standard")]
    pub speed: Speed,

    /// Play a campaign board against the campaign bot
    #[arg(long, conflicts_with = "bot")]
    pub level: Option<usize>,

    /// Hand black to a bot of this difficulty
    #[arg(long)]
    pub bot: Option<Difficulty>,

    /// Seed for the bot's random draws
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[arg(long, default_value = "lightning")]
    pub speed: Speed,

    /// Difficulty of the bot playing white
    #[arg(long, default_value = "advanced")]
    pub white: Difficulty,

    /// Difficulty of the bot playing black
    #[arg(long, default_value = "advanced")]
    pub black: Difficulty,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 50_000)]
    pub max_ticks: u64,

    /// Write the replay of the finished game here
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Replay JSON file
    pub file: PathBuf,

    /// Print the board as it stands at the end
    #[arg(long)]
    pub board: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_engine_types() {
        let cli = Cli::try_parse_from(["kfchess", "simulate", "--speed", "standard", "--black", "novice"])
            .expect("valid arguments");
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.speed, Speed::Standard);
        assert_eq!(args.white, Difficulty::Advanced);
        assert_eq!(args.black, Difficulty::Novice);

        assert!(Cli::try_parse_from(["kfchess", "play", "--speed", "glacial"]).is_err());
        assert!(
            Cli::try_parse_from(["kfchess", "play", "--level", "0", "--bot", "novice"]).is_err(),
            "Campaign levels bring their own bot"
        );
    }
}
