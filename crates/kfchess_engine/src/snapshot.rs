//! Serializable view of a whole game
//!
//! A [`GameSnapshot`] is what gets sent to clients and written alongside
//! replays. It owns copies of everything, so it can outlive the game it was
//! taken from. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::*;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub speed: Speed,
    pub players: [PlayerKind; 2],
    pub pieces: Vec<Piece>,
    pub is_campaign: bool,

    pub ticks_per_cell: u64,
    pub cooldown_ticks: u64,
    pub players_ready: [bool; 2],

    pub active_moves: Vec<Move>,
    pub cooldowns: Vec<Cooldown>,
    pub move_log: Vec<Move>,
    pub current_tick: u64,
    /// Seconds since the last tick, for client-side interpolation
    pub time_since_last_tick: f64,
    pub started: bool,
    pub finished: GameStatus,
    pub start_time: String,
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        GameSnapshot {
            speed: game.speed,
            players: game.players,
            pieces: game.board.pieces().to_vec(),
            is_campaign: game.is_campaign(),
            ticks_per_cell: game.ticks_per_cell,
            cooldown_ticks: game.cooldown_ticks,
            players_ready: game.players_ready,
            active_moves: game.active_moves.clone(),
            cooldowns: game.cooldowns.clone(),
            move_log: game.move_log.clone(),
            current_tick: game.current_tick,
            time_since_last_tick: game.last_tick_at.elapsed().as_secs_f64(),
            started: game.started,
            finished: game.status,
            start_time: game.start_time.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_wire_format() {
        let mut game = Game::new(Speed::Lightning, [PlayerKind::Human, PlayerKind::Bot]);
        let pawn = game
            .board()
            .piece_at(Square::new(6, 4))
            .expect("pawn")
            .id;
        game.move_piece(pawn, 1, 4, 4).expect("e2-e4");
        game.advance();

        let json = serde_json::to_value(game.snapshot()).expect("serialize snapshot");
        assert_eq!(json["speed"], "lightning");
        assert_eq!(json["players"][1], "bot");
        assert_eq!(json["currentTick"], 1);
        assert_eq!(json["finished"], 0);
        assert_eq!(json["ticksPerCell"], 2);
        assert_eq!(json["activeMoves"][0]["pieceId"], pawn);
        assert_eq!(json["activeMoves"][0]["startingTick"], 0);
        assert_eq!(json["pieces"].as_array().map(Vec::len), Some(32));
    }

    #[test]
    fn test_snapshot_reads_back() {
        let game = Game::new(Speed::Standard, [PlayerKind::Human; 2]);
        let snapshot = game.snapshot();
        let text = serde_json::to_string(&snapshot).expect("serialize");
        let back: GameSnapshot = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back.pieces, snapshot.pieces);
        assert_eq!(back.finished, GameStatus::Continues);
    }
}
