//! # kfchess_engine - Continuous-Time Chess Simulation
//!
//! ## Overview
//!
//! Kung Fu Chess has no turns. Either player may send any idle piece anywhere
//! it could legally go, at any moment. Pieces then travel across the board
//! over a number of ticks, rest for a cooldown once they arrive, and capture
//! whatever enemy they run into on the way.
//!
//! This crate is the whole rules engine and nothing else: no networking, no
//! persistence, no clocks beyond the idle-draw check. A driver owns a
//! [`Game`], feeds it commands through [`Game::move_piece`], and calls
//! [`Game::advance`] at a fixed cadence.
//!
//! ## Module Organization
//!
//! - [`types`] / [`board`] - pieces, squares and the piece arena
//! - [`move_gen`] - path computation and threat detection
//! - [`game`] - the state machine and its tick step
//! - [`ai`] - heuristic bots
//! - [`replay`] - recording and reconstruction
//! - [`campaign`] - built-in single-player boards
//!
//! ## Examples
//!
//! ```rust,ignore
//! use kfchess_engine::{Game, PlayerKind, Speed, Square};
//!
//! let mut game = Game::new(Speed::Standard, [PlayerKind::Human, PlayerKind::Human]);
//! let pawn = game.board().piece_at(Square::new(6, 4)).unwrap().id;
//! game.move_piece(pawn, 1, 4, 4)?;
//!
//! for _ in 0..20 {
//!     let (status, events) = game.advance();
//! }
//! ```

pub mod ai;
pub mod board;
pub mod campaign;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod move_gen;
pub mod replay;
pub mod snapshot;
pub mod types;

pub use ai::{Bot, BotDraws, BotMove, Difficulty};
pub use board::Board;
pub use error::{EngineError, EngineResult, MoveRejection};
pub use events::GameEvent;
pub use game::Game;
pub use replay::{Replay, ReplayMove};
pub use snapshot::GameSnapshot;
pub use types::{
    Cooldown, GameStatus, Move, Piece, PieceId, PieceType, Player, PlayerKind, Point, Speed,
    Square, Waypoint,
};
