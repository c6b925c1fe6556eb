//! Who targets whom
//!
//! A [`ThreatMap`] records, for every uncaptured piece, the enemy pieces that
//! could capture on its square (attackers) and the allied pieces that could
//! recapture there (defenders). It is built once per selection from a single
//! occupancy snapshot and then consulted for every candidate move.

use crate::board::{Board, Occupancy};
use crate::move_gen::can_target;
use crate::types::PieceId;

#[derive(Debug, Clone, Default)]
pub struct ThreatMap {
    attackers: Vec<Vec<PieceId>>,
    defenders: Vec<Vec<PieceId>>,
}

impl ThreatMap {
    pub fn build(board: &Board, occupancy: &Occupancy) -> Self {
        let len = board.pieces().len();
        let mut map = ThreatMap {
            attackers: vec![Vec::new(); len],
            defenders: vec![Vec::new(); len],
        };

        let live: Vec<_> = board.pieces().iter().filter(|p| !p.captured).collect();
        for target in &live {
            for other in &live {
                if other.id == target.id || !can_target(occupancy, other, target.square()) {
                    continue;
                }
                if other.player == target.player {
                    map.defenders[target.id].push(other.id);
                } else {
                    map.attackers[target.id].push(other.id);
                }
            }
        }

        map
    }

    /// Enemy pieces that currently target `piece`
    pub fn attackers(&self, piece: PieceId) -> &[PieceId] {
        self.attackers.get(piece).map_or(&[], Vec::as_slice)
    }

    /// Allied pieces that currently target `piece`
    pub fn defenders(&self, piece: PieceId) -> &[PieceId] {
        self.defenders.get(piece).map_or(&[], Vec::as_slice)
    }

    pub fn is_attacked_by(&self, piece: PieceId, attacker: PieceId) -> bool {
        self.attackers(piece).contains(&attacker)
    }

    pub fn is_defended_by(&self, piece: PieceId, defender: PieceId) -> bool {
        self.defenders(piece).contains(&defender)
    }
}
