//! Headless bot-versus-bot games

use std::fs;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use kfchess_engine::constants::{PLAYER_ONE, PLAYER_TWO};
use kfchess_engine::{Bot, BotDraws, Game, GameStatus, PlayerKind, Replay, Speed};

use crate::cli::SimulateArgs;

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        "[SIMULATE] {} vs {} at {} speed, seed {}",
        args.white, args.black, args.speed, seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let bots = [Bot::new(args.white), Bot::new(args.black)];
    let game = play_out(args.speed, bots, &mut rng, args.max_ticks);

    let result = match game.status() {
        GameStatus::Winner(PLAYER_ONE) => "white wins".to_string(),
        GameStatus::Winner(_) => "black wins".to_string(),
        GameStatus::Draw => "draw".to_string(),
        GameStatus::Continues => format!("unfinished after {} ticks", args.max_ticks),
    };
    println!(
        "{} after {} ticks and {} moves",
        result,
        game.current_tick(),
        game.move_log().len()
    );

    if let Some(path) = args.out {
        let replay = Replay::from_game(&game);
        let json = serde_json::to_string_pretty(&replay)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("[SIMULATE] Replay saved to {}", path.display());
    }
    Ok(())
}

/// Run a bot game until it ends or `max_ticks` have passed
pub fn play_out<R: Rng>(speed: Speed, bots: [Bot; 2], rng: &mut R, max_ticks: u64) -> Game {
    let mut game = Game::new(speed, [PlayerKind::Bot; 2]);
    game.mark_ready(PLAYER_ONE);
    game.mark_ready(PLAYER_TWO);

    while game.current_tick() < max_ticks && !game.status().is_finished() {
        for (player, bot) in [PLAYER_ONE, PLAYER_TWO].into_iter().zip(bots) {
            let draws = BotDraws::from_rng(rng);
            if let Some(choice) = bot.select_move(&game, player, draws) {
                if let Err(reason) = game.move_piece(choice.piece, player, choice.row, choice.col) {
                    debug!("[SIMULATE] player {} move refused: {}", player, reason);
                }
            }
        }
        game.advance();
    }
    game
}
