//! Candidate move scoring
//!
//! ## Terms
//!
//! | Term          | Weight | Measures                                          |
//! |---------------|--------|---------------------------------------------------|
//! | advance       | 2      | rows gained toward the opponent (pawns doubled)   |
//! | center        | 1      | columns gained toward the middle                  |
//! | capture       | 16     | value of a resting enemy on the destination       |
//! | pressure      | 8      | change in enemy value the mover targets           |
//! | vulnerability | 12     | change in how exposed the mover is                |
//! | protection    | 4      | change in cover for attacked allies               |
//!
//! Every term is a *difference* between the board as it is and the board with
//! the mover on its destination, so a move that changes nothing scores zero
//! apart from its advance and centralization.
//!
//! Threat tests for the moved piece use the occupancy snapshot with its origin
//! square vacated; otherwise the piece would block its own rays.

use crate::board::Occupancy;
use crate::constants::*;
use crate::game::Game;
use crate::move_gen::can_target;
use crate::types::*;

use super::threat::ThreatMap;

/// Per-term breakdown, mostly useful for tracing and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub advance: f64,
    pub center: f64,
    pub capture: f64,
    pub pressure: f64,
    pub vulnerability: f64,
    pub protection: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        ADVANCE_WEIGHT * self.advance
            + CENTER_WEIGHT * self.center
            + CAPTURE_WEIGHT * self.capture
            + PRESSURE_WEIGHT * self.pressure
            + VULNERABILITY_WEIGHT * self.vulnerability
            + PROTECTION_WEIGHT * self.protection
    }
}

/// Score moving `piece` to `to`
///
/// # Arguments
///
/// * `game` - Read-only engine state
/// * `threats` - Threat map for the current board
/// * `occupancy` - Occupancy snapshot the threat map was built from
/// * `piece` - The idle piece being considered
/// * `to` - A destination the validator accepts
pub fn score_move(
    game: &Game,
    threats: &ThreatMap,
    occupancy: &Occupancy,
    piece: &Piece,
    to: Square,
) -> ScoreBreakdown {
    let moved = piece.at(to);
    let after = occupancy.without(piece.square());
    let mut score = ScoreBreakdown::default();

    score.advance = if piece.piece_type == PieceType::Pawn && to.row == promotion_row(piece.player) {
        PROMOTION_ADVANCE
    } else {
        let rows = f64::from((to.row - piece.row) * forward(piece.player));
        if piece.piece_type == PieceType::Pawn {
            rows * 2.0
        } else {
            rows
        }
    };

    score.center = (CENTER_COL - f64::from(piece.col)).abs() - (CENTER_COL - f64::from(to.col)).abs();

    let values = |ids: &[PieceId]| -> Vec<f64> {
        ids.iter()
            .filter_map(|&id| game.board().get(id))
            .map(Piece::value)
            .collect()
    };

    for other in game.board().pieces() {
        if other.captured || other.id == piece.id {
            continue;
        }

        if other.player != piece.player {
            if other.square() == to && !game.is_moving(other.id) {
                score.capture += other.value();

                // allies this enemy was threatening are safe once it is gone
                for ally in game.board().pieces_of(piece.player) {
                    if threats.is_attacked_by(ally.id, other.id) {
                        score.vulnerability += ally.value();
                    }
                }
            }

            let old_pressure = threats.is_attacked_by(other.id, piece.id);
            let new_pressure = can_target(&after, &moved, other.square());
            let weight = if threats.defenders(other.id).is_empty() {
                1.0
            } else {
                DEFENDED_PRESSURE_FACTOR
            };
            score.pressure += delta(old_pressure, new_pressure) * other.value() * weight;

            let old_exposure = threats.is_attacked_by(piece.id, other.id);
            let new_exposure = can_target(&after, other, to);
            score.vulnerability -= delta(old_exposure, new_exposure) * piece.value();
        } else {
            let old_cover = threats.is_defended_by(other.id, piece.id);
            let new_cover = can_target(&after, &moved, other.square());

            let cover_value = values(threats.attackers(other.id))
                .into_iter()
                .reduce(f64::min)
                .map_or(0.0, |cheapest| cheapest - other.value());
            score.protection += delta(old_cover, new_cover) * cover_value;
        }
    }

    score
}

fn delta(before: bool, after: bool) -> f64 {
    f64::from(u8::from(after)) - f64::from(u8::from(before))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn setup(layout: &str) -> (Game, ThreatMap, Occupancy) {
        let board = Board::from_layout(layout).expect("layout");
        let game = Game::with_board(Speed::Standard, [PlayerKind::Bot; 2], board);
        let occupancy = game.board().occupancy();
        let threats = ThreatMap::build(game.board(), &occupancy);
        (game, threats, occupancy)
    }

    fn score_at(layout: &str, from: Square, to: Square) -> ScoreBreakdown {
        let (game, threats, occupancy) = setup(layout);
        let piece = game.board().piece_at(from).expect("mover").clone();
        score_move(&game, &threats, &occupancy, &piece, to)
    }

    #[test]
    fn test_quiet_pawn_push() {
        let board = Board::initial().to_string();
        let score = score_at(&board, Square::new(6, 4), Square::new(4, 4));
        assert_eq!(score.advance, 4.0, "Two rows, doubled for a pawn");
        assert_eq!(score.center, 0.0);
        assert_eq!(score.capture, 0.0);
        assert_eq!(score.total(), 8.0);
    }

    #[test]
    fn test_promotion_scores_maximum_advance() {
        let layout = "
            0000000000000000
            0000P10000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
        ";
        let score = score_at(layout, Square::new(1, 2), Square::new(0, 2));
        assert_eq!(score.advance, PROMOTION_ADVANCE);
    }

    #[test]
    fn test_capture_relieves_threatened_allies() {
        let layout = "
            Q2000000K2000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            R1000000K1000000
        ";
        let score = score_at(layout, Square::new(7, 0), Square::new(0, 0));
        assert_eq!(score.capture, QUEEN_VALUE);
        assert_eq!(
            score.vulnerability,
            2.0 * ROOK_VALUE,
            "Rook no longer attacked, counted once for the capture and once for the exposure change"
        );
        assert_eq!(
            score.pressure,
            KING_VALUE * DEFENDED_PRESSURE_FACTOR - QUEEN_VALUE,
            "Pressure moves from the taken queen to the king it was covering"
        );
    }

    #[test]
    fn test_stepping_into_attack_is_penalized() {
        let layout = "
            0000000000000000
            0000R20000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            000000N100000000
        ";
        let score = score_at(layout, Square::new(7, 3), Square::new(5, 2));
        assert_eq!(score.vulnerability, -KNIGHT_VALUE);
    }

    #[test]
    fn test_covering_an_attacked_ally() {
        let layout = "
            0000000000000000
            000000R200000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            000000Q100000000
            0000000000R10000
        ";
        // rook slides under the queen it now covers
        let score = score_at(layout, Square::new(7, 5), Square::new(7, 3));
        assert_eq!(score.protection, ROOK_VALUE - QUEEN_VALUE);
    }
}
