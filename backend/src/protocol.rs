//! Wire messages between clients and the game server
//!
//! Both directions are JSON objects tagged by `type`, with camelCase field
//! names to match [`GameSnapshot`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kfchess_engine::{Difficulty, GameEvent, GameSnapshot, GameStatus, PieceId, Player, Speed};

/// Client -> Server
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Open a new game. Seats listed in `bots` are played by the server.
    New {
        speed: Speed,
        #[serde(default)]
        bots: BTreeMap<Player, Difficulty>,
        /// Play a campaign board instead of the standard layout
        #[serde(default)]
        level: Option<usize>,
    },
    Ready {
        game_id: String,
        player_key: String,
    },
    Move {
        game_id: String,
        player_key: String,
        piece_id: PieceId,
        to_row: i8,
        to_col: i8,
    },
    Reset {
        game_id: String,
        player_key: String,
    },
    Cancel {
        game_id: String,
        player_key: String,
    },
    Difficulty {
        game_id: String,
        player_key: String,
        player: Player,
        difficulty: Difficulty,
    },
}

/// Server -> Client
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Reply to [`ClientMessage::New`]; keys only exist for human seats
    Created {
        game_id: String,
        player_keys: BTreeMap<Player, String>,
        snapshot: GameSnapshot,
    },
    /// A tick changed something
    Update {
        game_id: String,
        snapshot: GameSnapshot,
        events: Vec<GameEvent>,
    },
    /// A human or bot move was attempted
    MoveAck {
        game_id: String,
        success: bool,
        snapshot: GameSnapshot,
    },
    ReadyAck {
        game_id: String,
        snapshot: GameSnapshot,
    },
    ResetAck {
        game_id: String,
        snapshot: GameSnapshot,
    },
    CancelAck {
        game_id: String,
    },
    DifficultyAck {
        game_id: String,
        snapshot: GameSnapshot,
    },
    GameOver {
        game_id: String,
        winner: GameStatus,
        ticks: u64,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    /// Game the message belongs to, if any
    pub fn game_id(&self) -> Option<&str> {
        match self {
            ServerMessage::Created { game_id, .. }
            | ServerMessage::Update { game_id, .. }
            | ServerMessage::MoveAck { game_id, .. }
            | ServerMessage::ReadyAck { game_id, .. }
            | ServerMessage::ResetAck { game_id, .. }
            | ServerMessage::CancelAck { game_id }
            | ServerMessage::DifficultyAck { game_id, .. }
            | ServerMessage::GameOver { game_id, .. } => Some(game_id),
            ServerMessage::Error { .. } => None,
        }
    }
}
