//! Rebuild a saved game from its replay file

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use kfchess_engine::{Game, GameStatus, Replay};

use crate::cli::ReplayArgs;

pub fn run(args: ReplayArgs) -> anyhow::Result<()> {
    let game = load(&args.file)?;

    if args.board {
        println!("{}", game.board());
    }
    let result = match game.status() {
        GameStatus::Winner(player) => format!("player {} won", player),
        GameStatus::Draw => "drawn".to_string(),
        GameStatus::Continues => "still running".to_string(),
    };
    println!("{} at tick {}", result, game.current_tick());
    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Game> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let replay: Replay =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    info!(
        "[REPLAY] {} moves over {} ticks at {} speed",
        replay.moves.len(),
        replay.ticks,
        replay.speed
    );
    Ok(replay.reconstruct()?)
}
