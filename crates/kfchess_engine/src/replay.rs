//! Replay recording and reconstruction
//!
//! A [`Replay`] is the move log boiled down to `(piece, player, destination,
//! tick)` tuples plus the total tick count. Because the engine is
//! deterministic apart from the campaign idle clock, re-issuing those moves on
//! the same ticks rebuilds the exact same game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::Board;
use crate::constants::{PLAYER_ONE, PLAYER_TWO};
use crate::error::EngineResult;
use crate::game::Game;
use crate::types::*;

/// One committed move
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplayMove {
    pub piece_id: PieceId,
    pub player: Player,
    pub row: i8,
    pub col: i8,
    pub tick: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Replay {
    pub speed: Speed,
    pub players: [PlayerKind; 2],
    pub moves: Vec<ReplayMove>,
    pub ticks: u64,
    /// Built-in campaign board the game was played on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_level: Option<usize>,
    /// Starting layout of a non-campaign game that did not use the standard board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl Replay {
    /// Record `game` as it stands now
    pub fn from_game(game: &Game) -> Self {
        let moves = game
            .move_log()
            .iter()
            .filter_map(|mv| {
                let to = mv.destination()?;
                Some(ReplayMove {
                    piece_id: mv.piece,
                    player: mv.player,
                    row: to.row,
                    col: to.col,
                    tick: mv.starting_tick,
                })
            })
            .collect();

        let campaign_level = game.campaign_level();
        Replay {
            speed: game.speed(),
            players: game.players(),
            moves,
            ticks: game.current_tick(),
            campaign_level,
            layout: if campaign_level.is_some() {
                None
            } else {
                game.starting_layout()
            },
        }
    }

    /// Moves grouped by the tick they were issued on
    pub fn moves_by_tick(&self) -> BTreeMap<u64, Vec<ReplayMove>> {
        let mut index: BTreeMap<u64, Vec<ReplayMove>> = BTreeMap::new();
        for mv in &self.moves {
            index.entry(mv.tick).or_default().push(*mv);
        }
        index
    }

    /// Fresh, unstarted game on the recorded starting board
    fn starting_game(&self) -> EngineResult<Game> {
        if let Some(level) = self.campaign_level {
            return Game::for_campaign(level, self.players);
        }
        let board = match &self.layout {
            Some(layout) => Board::from_layout(layout)?,
            None => Board::initial(),
        };
        Ok(Game::with_board(self.speed, self.players, board))
    }

    /// Play the recorded moves into a fresh game
    ///
    /// Stops at the recorded tick count or when the game finishes. A move
    /// whose piece is already moving when it comes up is skipped: that is the
    /// rook of a castle, which its king's move has already re-created.
    ///
    /// Campaign games come back as campaign games, but their wall-clock idle
    /// draw is not replayed: reconstruction runs far faster than real time.
    pub fn reconstruct(&self) -> EngineResult<Game> {
        let mut game = self.starting_game()?;
        game.mark_ready(PLAYER_ONE);
        game.mark_ready(PLAYER_TWO);

        let index = self.moves_by_tick();
        while game.current_tick() < self.ticks && !game.status().is_finished() {
            if let Some(moves) = index.get(&game.current_tick()) {
                for mv in moves {
                    if game.is_moving(mv.piece_id) {
                        continue;
                    }
                    if let Err(reason) = game.move_piece(mv.piece_id, mv.player, mv.row, mv.col) {
                        warn!(
                            "[REPLAY] tick {}: recorded move of piece {} no longer applies: {}",
                            mv.tick, mv.piece_id, reason
                        );
                    }
                }
            }
            game.advance();
        }

        Ok(game)
    }
}
