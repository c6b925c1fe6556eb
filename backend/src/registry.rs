//! Live sessions by game id
//!
//! The registry is the only place that maps game ids to sessions. Each
//! session sits behind its own mutex so the driver and client commands
//! serialize per game while different games never wait on each other.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::Rng;
use tracing::{debug, info, warn};

use kfchess_engine::{Difficulty, Player, Speed};

use crate::error::{BackendError, BackendResult};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::GameSession;

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
pub struct GameRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Six uppercase letters
    fn generate_code() -> String {
        let mut rng = rand::rng();
        (0..6)
            .map(|_| rng.random_range(b'A'..=b'Z') as char)
            .collect()
    }

    /// Create a session under a fresh id
    pub fn create(
        &self,
        speed: Speed,
        bots: &BTreeMap<Player, Difficulty>,
        level: Option<usize>,
    ) -> BackendResult<(String, SharedSession)> {
        let mut sessions = self.sessions.write();
        let game_id = loop {
            let code = Self::generate_code();
            if !sessions.contains_key(&code) {
                break code;
            }
        };

        let session = GameSession::new(game_id.clone(), speed, bots, level)?;
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(game_id.clone(), shared.clone());
        info!(
            "[REGISTRY] Created game {} ({}, bots {:?}, level {:?})",
            game_id, speed, bots, level
        );
        Ok((game_id, shared))
    }

    pub fn get(&self, game_id: &str) -> BackendResult<SharedSession> {
        self.sessions
            .read()
            .get(game_id)
            .cloned()
            .ok_or_else(|| BackendError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }

    pub fn remove(&self, game_id: &str) -> Option<SharedSession> {
        self.sessions.write().remove(game_id)
    }

    /// Remove a game on behalf of a key holder, if it may be cancelled
    ///
    /// The check and the removal happen under the map's write lock, so no
    /// other command can reach the session in between.
    pub fn cancel(&self, game_id: &str, player_key: &str) -> BackendResult<()> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get(game_id)
            .ok_or_else(|| BackendError::GameNotFound {
                game_id: game_id.to_string(),
            })?;
        session.lock().check_cancel(player_key)?;
        sessions.remove(game_id);
        info!("[REGISTRY] Cancelled game {}", game_id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Every session, ordered by id
    pub fn sessions(&self) -> Vec<(String, SharedSession)> {
        let mut all: Vec<_> = self
            .sessions
            .read()
            .iter()
            .map(|(id, session)| (id.clone(), session.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Apply a client command and build the reply
    ///
    /// Failures become [`ServerMessage::Error`]; a rejected move is a normal
    /// [`ServerMessage::MoveAck`] with `success: false`.
    pub fn handle(&self, message: ClientMessage) -> ServerMessage {
        match self.try_handle(message) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("[REGISTRY] Command failed: {}", e);
                ServerMessage::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    fn try_handle(&self, message: ClientMessage) -> BackendResult<ServerMessage> {
        match message {
            ClientMessage::New { speed, bots, level } => {
                let (game_id, session) = self.create(speed, &bots, level)?;
                let session = session.lock();
                Ok(ServerMessage::Created {
                    game_id,
                    player_keys: session.player_keys(),
                    snapshot: session.snapshot(),
                })
            }
            ClientMessage::Ready {
                game_id,
                player_key,
            } => {
                let session = self.get(&game_id)?;
                let mut session = session.lock();
                let player = session.ready(&player_key)?;
                debug!("[REGISTRY] {} player {} ready", game_id, player);
                Ok(ServerMessage::ReadyAck {
                    game_id,
                    snapshot: session.snapshot(),
                })
            }
            ClientMessage::Move {
                game_id,
                player_key,
                piece_id,
                to_row,
                to_col,
            } => {
                let session = self.get(&game_id)?;
                let mut session = session.lock();
                let success = match session.move_piece(&player_key, piece_id, to_row, to_col) {
                    Ok(_) => true,
                    Err(BackendError::MoveRejected(reason)) => {
                        debug!("[REGISTRY] {} move rejected: {}", game_id, reason);
                        false
                    }
                    Err(e) => return Err(e),
                };
                Ok(ServerMessage::MoveAck {
                    game_id,
                    success,
                    snapshot: session.snapshot(),
                })
            }
            ClientMessage::Reset {
                game_id,
                player_key,
            } => {
                let session = self.get(&game_id)?;
                let mut session = session.lock();
                session.reset(&player_key)?;
                Ok(ServerMessage::ResetAck {
                    game_id,
                    snapshot: session.snapshot(),
                })
            }
            ClientMessage::Cancel {
                game_id,
                player_key,
            } => {
                self.cancel(&game_id, &player_key)?;
                Ok(ServerMessage::CancelAck { game_id })
            }
            ClientMessage::Difficulty {
                game_id,
                player_key,
                player,
                difficulty,
            } => {
                let session = self.get(&game_id)?;
                let mut session = session.lock();
                session.set_difficulty(&player_key, player, difficulty)?;
                Ok(ServerMessage::DifficultyAck {
                    game_id,
                    snapshot: session.snapshot(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfchess_engine::constants::{PLAYER_ONE, PLAYER_TWO};

    fn new_game(registry: &GameRegistry, bots: BTreeMap<Player, Difficulty>) -> (String, String) {
        let reply = registry.handle(ClientMessage::New {
            speed: Speed::Standard,
            bots,
            level: None,
        });
        match reply {
            ServerMessage::Created {
                game_id,
                player_keys,
                ..
            } => (game_id, player_keys[&PLAYER_ONE].clone()),
            other => panic!("expected Created, got {:?}", other),
        }
    }

    #[test]
    fn test_game_codes() {
        let code = GameRegistry::generate_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{}", code);
    }

    #[test]
    fn test_create_and_lookup() {
        let registry = GameRegistry::new();
        let (game_id, _) = new_game(&registry, BTreeMap::new());
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&game_id).is_ok());

        let err = registry.get("ZZZZZZ0").err().expect("unknown id");
        assert!(matches!(err, BackendError::GameNotFound { .. }));
    }

    #[test]
    fn test_rejected_move_is_unsuccessful_ack() {
        let registry = GameRegistry::new();
        let (game_id, key) = new_game(&registry, BTreeMap::new());

        let reply = registry.handle(ClientMessage::Move {
            game_id,
            player_key: key,
            piece_id: 0,
            to_row: 3,
            to_col: 3,
        });
        assert!(
            matches!(reply, ServerMessage::MoveAck { success: false, .. }),
            "Piece 0 is a rook of player two: {:?}",
            reply
        );
    }

    #[test]
    fn test_bad_key_is_error_reply() {
        let registry = GameRegistry::new();
        let (game_id, _) = new_game(&registry, BTreeMap::new());

        let reply = registry.handle(ClientMessage::Ready {
            game_id,
            player_key: "wrong".into(),
        });
        assert!(matches!(reply, ServerMessage::Error { .. }));
    }

    #[test]
    fn test_cancel_before_start_removes_session() {
        let registry = GameRegistry::new();
        let bots = BTreeMap::from([(PLAYER_TWO, Difficulty::Novice)]);
        let (game_id, key) = new_game(&registry, bots);

        let reply = registry.handle(ClientMessage::Cancel {
            game_id: game_id.clone(),
            player_key: key,
        });
        assert_eq!(reply, ServerMessage::CancelAck { game_id });
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cancel_refused_mid_game() {
        let registry = GameRegistry::new();
        let bots = BTreeMap::from([(PLAYER_TWO, Difficulty::Novice)]);
        let (game_id, key) = new_game(&registry, bots);
        registry.handle(ClientMessage::Ready {
            game_id: game_id.clone(),
            player_key: key.clone(),
        });

        let reply = registry.handle(ClientMessage::Cancel {
            game_id,
            player_key: key,
        });
        assert!(matches!(reply, ServerMessage::Error { .. }));
        assert_eq!(registry.len(), 1, "Started game stays registered");
    }

    #[test]
    fn test_concurrent_cancels_remove_once() {
        let registry = GameRegistry::new();
        let (game_id, key) = new_game(&registry, BTreeMap::new());
        let barrier = std::sync::Barrier::new(4);

        let acks = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        registry.handle(ClientMessage::Cancel {
                            game_id: game_id.clone(),
                            player_key: key.clone(),
                        })
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("cancel thread"))
                .filter(|reply| matches!(reply, ServerMessage::CancelAck { .. }))
                .count()
        });

        assert_eq!(acks, 1, "Exactly one cancel wins");
        assert!(registry.is_empty());
    }
}
