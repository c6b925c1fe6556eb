//! # Game Sessions
//!
//! ## Overview
//!
//! A [`GameSession`] wraps one [`Game`] with everything the server needs
//! around it:
//!
//! - the bot (if any) playing each seat,
//! - a secret key per human seat, handed out once at creation,
//! - the campaign level the board came from, so a reset can rebuild it.
//!
//! Every command from a client is authenticated by its player key before it
//! reaches the engine. The driver calls [`GameSession::run_tick`] once per
//! tick: bots move first, then the game advances.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;
use web_time::Instant;

use kfchess_engine::constants::{PLAYER_ONE, PLAYER_TWO};
use kfchess_engine::{
    Bot, BotDraws, Difficulty, Game, GameSnapshot, Move, PieceId, Player, PlayerKind, Speed,
};

use crate::error::{BackendError, BackendResult};
use crate::protocol::ServerMessage;

const SEATS: [Player; 2] = [PLAYER_ONE, PLAYER_TWO];

/// What one tick did to a session
#[derive(Debug, Default)]
pub struct PassOutcome {
    /// Messages for the game's clients, in emission order
    pub messages: Vec<ServerMessage>,
    /// The game was running and advanced by one tick
    pub advanced: bool,
    /// The game finished on this tick
    pub finished: bool,
}

#[derive(Debug)]
pub struct GameSession {
    game_id: String,
    game: Game,
    bots: [Option<Bot>; 2],
    player_keys: [Option<String>; 2],
    level: Option<usize>,
    created_at: DateTime<Utc>,
}

impl GameSession {
    /// Open a session for a new game
    ///
    /// # Arguments
    ///
    /// * `game_id` - Registry key for the session
    /// * `speed` - Pace of a standard game; campaign levels bring their own
    /// * `bots` - Seats played by the server, with their difficulty
    /// * `level` - Campaign board to play instead of the standard layout
    pub fn new(
        game_id: String,
        speed: Speed,
        bots: &BTreeMap<Player, Difficulty>,
        level: Option<usize>,
    ) -> BackendResult<Self> {
        let mut seats = [None, None];
        for (&player, &difficulty) in bots {
            let index = seat_index(player)?;
            seats[index] = Some(Bot::new(difficulty));
        }

        let kinds = seats.map(|bot| match bot {
            Some(_) => PlayerKind::Bot,
            None => PlayerKind::Human,
        });
        let game = match level {
            Some(level) => Game::for_campaign(level, kinds)?,
            None => Game::new(speed, kinds),
        };
        let player_keys = seats.map(|bot| match bot {
            Some(_) => None,
            None => Some(Uuid::new_v4().to_string()),
        });

        let mut session = GameSession {
            game_id,
            game,
            bots: seats,
            player_keys,
            level,
            created_at: Utc::now(),
        };
        session.ready_bots();
        Ok(session)
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn bot(&self, player: Player) -> Option<&Bot> {
        seat_index(player).ok().and_then(|i| self.bots[i].as_ref())
    }

    /// Keys for the human seats
    pub fn player_keys(&self) -> BTreeMap<Player, String> {
        SEATS
            .iter()
            .zip(&self.player_keys)
            .filter_map(|(&player, key)| Some((player, key.clone()?)))
            .collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Seat that owns `key`
    pub fn authenticate(&self, key: &str) -> BackendResult<Player> {
        SEATS
            .iter()
            .zip(&self.player_keys)
            .find(|(_, seat_key)| seat_key.as_deref() == Some(key))
            .map(|(&player, _)| player)
            .ok_or_else(|| BackendError::InvalidKey {
                game_id: self.game_id.clone(),
            })
    }

    pub fn ready(&mut self, key: &str) -> BackendResult<Player> {
        let player = self.authenticate(key)?;
        self.game.mark_ready(player);
        Ok(player)
    }

    /// Move one of the key holder's pieces
    pub fn move_piece(
        &mut self,
        key: &str,
        piece_id: PieceId,
        row: i8,
        col: i8,
    ) -> BackendResult<Move> {
        let player = self.authenticate(key)?;
        Ok(self.game.move_piece(piece_id, player, row, col)?)
    }

    /// Replace the game with a fresh one of the same configuration
    ///
    /// Multiplayer games can only be reset once they are over; campaign games
    /// can be restarted at any time.
    pub fn reset(&mut self, key: &str) -> BackendResult<()> {
        self.authenticate(key)?;
        if self.level.is_none() && !self.game.status().is_finished() {
            return Err(BackendError::ResetRefused {
                game_id: self.game_id.clone(),
            });
        }

        self.game = self.game.restart()?;
        self.ready_bots();
        info!("[SESSION] {} reset", self.game_id);
        Ok(())
    }

    /// Check that the key holder may cancel the game
    pub fn check_cancel(&self, key: &str) -> BackendResult<()> {
        self.authenticate(key)?;
        if self.game.is_started() && !self.game.status().is_finished() {
            return Err(BackendError::CancelRefused {
                game_id: self.game_id.clone(),
            });
        }
        Ok(())
    }

    /// Change the difficulty of the bot on `player`'s seat
    pub fn set_difficulty(
        &mut self,
        key: &str,
        player: Player,
        difficulty: Difficulty,
    ) -> BackendResult<()> {
        self.authenticate(key)?;
        let index = seat_index(player)?;
        let bot = self.bots[index]
            .as_mut()
            .ok_or_else(|| BackendError::NotABot {
                game_id: self.game_id.clone(),
                player,
            })?;
        bot.set_difficulty(difficulty);
        Ok(())
    }

    /// Whether nobody has moved for longer than `expiry`
    pub fn is_expired(&self, now: Instant, expiry: Duration) -> bool {
        now.saturating_duration_since(self.game.idle_since()) > expiry
    }

    /// One driver pass: bot moves, then one engine tick
    ///
    /// Games that have not started or are already over are left alone.
    /// `draws` holds this tick's random numbers for seats one and two.
    pub fn run_tick(&mut self, draws: [BotDraws; 2]) -> PassOutcome {
        let mut outcome = PassOutcome::default();
        if !self.game.is_started() || self.game.status().is_finished() {
            return outcome;
        }

        let mut moved = false;
        for ((&player, bot), draws) in SEATS.iter().zip(&self.bots).zip(draws) {
            let Some(bot) = bot else {
                continue;
            };
            let Some(choice) = bot.select_move(&self.game, player, draws) else {
                continue;
            };
            match self.game.move_piece(choice.piece, player, choice.row, choice.col) {
                Ok(_) => moved = true,
                Err(reason) => debug!(
                    "[SESSION] {} bot for player {} was refused: {}",
                    self.game_id, player, reason
                ),
            }
        }

        if moved {
            outcome.messages.push(ServerMessage::MoveAck {
                game_id: self.game_id.clone(),
                success: true,
                snapshot: self.game.snapshot(),
            });
        }

        let (status, events) = self.game.advance();
        outcome.advanced = true;
        if !events.is_empty() {
            outcome.messages.push(ServerMessage::Update {
                game_id: self.game_id.clone(),
                snapshot: self.game.snapshot(),
                events,
            });
        }

        if status.is_finished() {
            outcome.finished = true;
            info!(
                "[SESSION] {} over after {} ticks: {:?}",
                self.game_id,
                self.game.current_tick(),
                status
            );
            outcome.messages.push(ServerMessage::GameOver {
                game_id: self.game_id.clone(),
                winner: status,
                ticks: self.game.current_tick(),
            });
        }

        outcome
    }

    fn ready_bots(&mut self) {
        for (&player, bot) in SEATS.iter().zip(&self.bots) {
            if bot.is_some() {
                self.game.mark_ready(player);
            }
        }
    }
}

fn seat_index(player: Player) -> BackendResult<usize> {
    SEATS
        .iter()
        .position(|&seat| seat == player)
        .ok_or(BackendError::InvalidSeat { player })
}
