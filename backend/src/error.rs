//! Error types for the game server

use kfchess_engine::{EngineError, MoveRejection, Player};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// An environment setting could not be parsed
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    /// The player key does not belong to any seat of the game
    #[error("Invalid player key for game {game_id}")]
    InvalidKey { game_id: String },

    #[error("Player {player} in game {game_id} is not a bot")]
    NotABot { game_id: String, player: Player },

    /// Seats are numbered 1 and 2
    #[error("No seat for player {player}")]
    InvalidSeat { player: Player },

    /// Only finished games and campaign games may be reset
    #[error("Game {game_id} is still in progress and cannot be reset")]
    ResetRefused { game_id: String },

    /// Only games that have not started or have finished may be cancelled
    #[error("Game {game_id} is in progress and cannot be cancelled")]
    CancelRefused { game_id: String },

    #[error("Move rejected: {0}")]
    MoveRejected(#[from] MoveRejection),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for server operations
pub type BackendResult<T> = Result<T, BackendError>;
