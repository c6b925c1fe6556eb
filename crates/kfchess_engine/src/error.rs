//! Error types for the engine
//!
//! Construction errors are fatal and returned as [`EngineError`]. Rejected
//! commands are not errors in that sense: they are ordinary
//! [`MoveRejection`] values handed back to the caller.

use thiserror::Error;

use crate::types::PieceId;

/// Errors raised while building engine objects from external input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Piece code in a layout is not one of P, N, B, R, Q, K
    #[error("Unknown piece type code: {code:?}")]
    UnknownPieceType { code: char },

    /// Player digit in a layout is not 1 or 2
    #[error("Invalid player {player:?} at row {row}, col {col}")]
    InvalidPlayer { player: char, row: usize, col: usize },

    /// Layout does not have 8 rows of 16 characters
    #[error("Malformed board layout: {message}")]
    MalformedLayout { message: String },

    /// Speed tag not recognised
    #[error("Unknown speed: {tag}")]
    UnknownSpeed { tag: String },

    /// Difficulty tag not recognised
    #[error("Unknown difficulty: {tag}")]
    UnknownDifficulty { tag: String },

    /// Campaign level index out of range
    #[error("Unknown campaign level {level} (have {available})")]
    UnknownCampaignLevel { level: usize, available: usize },
}

/// Result type alias for engine construction
pub type EngineResult<T> = Result<T, EngineError>;

/// Why a move command was turned down
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("game is already finished")]
    GameFinished,

    #[error("piece {piece} does not exist")]
    UnknownPiece { piece: PieceId },

    #[error("piece {piece} is not controlled by player {player}")]
    WrongOwner { piece: PieceId, player: u8 },

    #[error("piece {piece} has been captured")]
    Captured { piece: PieceId },

    #[error("destination ({row}, {col}) is out of bounds")]
    OutOfBounds { row: i8, col: i8 },

    #[error("destination is the piece's current square")]
    SameSquare,

    #[error("piece {piece} is already moving")]
    AlreadyMoving { piece: PieceId },

    #[error("piece {piece} is on cooldown")]
    OnCooldown { piece: PieceId },

    #[error("piece cannot move to destination or is blocked")]
    Illegal,
}
