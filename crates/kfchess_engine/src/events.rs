//! Structured records emitted by [`crate::game::Game::advance`]
//!
//! The engine never formats network messages; it hands these to whoever drives
//! it. Each record carries a copy of the piece(s) involved as they were at the
//! end of the step that produced it.

use serde::{Deserialize, Serialize};

use crate::types::Piece;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GameEvent {
    /// A pawn reached the far row and became a queen
    Promotion { piece: Piece },
    /// `piece` captured `target`
    Capture { piece: Piece, target: Piece },
    /// A piece finished moving and started resting
    StartCooldown { piece: Piece },
    /// A piece may move again
    EndCooldown { piece: Piece },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    #[test]
    fn test_event_tags_match_wire_names() {
        let piece = Piece::new(3, PieceType::Rook, 1, 7, 7);
        let json = serde_json::to_value(GameEvent::StartCooldown {
            piece: piece.clone(),
        })
        .expect("serialize");
        assert_eq!(json["type"], "startcooldown");
        assert_eq!(json["piece"]["type"], "R");

        let json = serde_json::to_value(GameEvent::EndCooldown { piece }).expect("serialize");
        assert_eq!(json["type"], "endcooldown");
    }
}
