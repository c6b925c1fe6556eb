//! # backend - Kung Fu Chess Game Server
//!
//! ## Overview
//!
//! Hosts many concurrent games on top of `kfchess_engine`. Clients talk to it
//! through [`protocol`] messages; everything that comes back goes through an
//! [`sink::EventSink`].
//!
//! ## Module Organization
//!
//! - [`config`] - environment settings
//! - [`registry`] - game id to session map and command dispatch
//! - [`session`] - one game with its bots and player keys
//! - [`driver`] - the periodic tick loop
//! - [`protocol`] / [`sink`] - messages and where they go

pub mod config;
pub mod driver;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod sink;

pub use config::ServerConfig;
pub use driver::{Driver, TickReport};
pub use error::{BackendError, BackendResult};
pub use protocol::{ClientMessage, ServerMessage};
pub use registry::GameRegistry;
pub use session::GameSession;
pub use sink::{CollectingSink, EventSink, JsonLinesSink};
