//! Threat detection
//!
//! Answers "could a piece of this type, standing here, capture on that
//! square?" against an [`Occupancy`] snapshot. The AI uses it to build threat
//! maps and to score how a candidate move changes them.
//!
//! ## Algorithm
//!
//! - Pawns threaten the two squares diagonally forward.
//! - Knights threaten their eight jump squares regardless of occupancy.
//! - Bishops, rooks and queens threaten along rays up to and including the
//!   first occupied square.
//! - Kings threaten the eight adjacent squares.
//!
//! Unlike move validation this ignores whether pieces are moving, cooling
//! down, or owned by anyone in particular; it is a static geometric test.

use crate::board::Occupancy;
use crate::constants::*;
use crate::types::*;

/// Check if `piece` could reach `target` from its current square
///
/// # Arguments
///
/// * `occupancy` - Squares that block rays
/// * `piece` - Attacker; its `row`/`col` are used as the origin
/// * `target` - Square under test
///
/// # Examples
///
/// ```rust,ignore
/// let occupancy = game.board().occupancy();
/// let threatened = can_target(&occupancy, &rook, Square::new(0, 0));
/// ```
pub fn can_target(occupancy: &Occupancy, piece: &Piece, target: Square) -> bool {
    let from = piece.square();
    if from == target {
        return false;
    }

    let row_delta = target.row - from.row;
    let col_delta = target.col - from.col;

    match piece.piece_type {
        PieceType::Pawn => {
            row_delta == forward(piece.player) && col_delta.abs() == 1
        }
        PieceType::Knight => KNIGHT_DIRS.contains(&(row_delta, col_delta)),
        PieceType::Bishop => diagonal_reach(occupancy, from, target, BOARD_SIZE),
        PieceType::Rook => straight_reach(occupancy, from, target, BOARD_SIZE),
        PieceType::Queen => {
            diagonal_reach(occupancy, from, target, BOARD_SIZE)
                || straight_reach(occupancy, from, target, BOARD_SIZE)
        }
        PieceType::King => {
            diagonal_reach(occupancy, from, target, 1) || straight_reach(occupancy, from, target, 1)
        }
    }
}

fn diagonal_reach(occupancy: &Occupancy, from: Square, target: Square, limit: i8) -> bool {
    let row_delta = target.row - from.row;
    let col_delta = target.col - from.col;
    if row_delta.abs() != col_delta.abs() {
        return false;
    }
    ray_reaches(occupancy, from, target, (row_delta.signum(), col_delta.signum()), limit)
}

fn straight_reach(occupancy: &Occupancy, from: Square, target: Square, limit: i8) -> bool {
    let row_delta = target.row - from.row;
    let col_delta = target.col - from.col;
    if row_delta != 0 && col_delta != 0 {
        return false;
    }
    ray_reaches(occupancy, from, target, (row_delta.signum(), col_delta.signum()), limit)
}

fn ray_reaches(
    occupancy: &Occupancy,
    from: Square,
    target: Square,
    (row_dir, col_dir): (i8, i8),
    limit: i8,
) -> bool {
    for i in 1..=limit {
        let square = from.offset(row_dir * i, col_dir * i);
        if square == target {
            return true;
        }
        if !square.in_bounds() || occupancy.is_occupied(square) {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_pawn_threatens_forward_diagonals_only() {
        let board = Board::initial();
        let occupancy = board.occupancy();
        let pawn = board.piece_at(Square::new(6, 4)).expect("white pawn");

        assert!(can_target(&occupancy, pawn, Square::new(5, 3)));
        assert!(can_target(&occupancy, pawn, Square::new(5, 5)));
        assert!(!can_target(&occupancy, pawn, Square::new(5, 4)));

        let black = board.piece_at(Square::new(1, 4)).expect("black pawn");
        assert!(can_target(&occupancy, black, Square::new(2, 3)));
        assert!(!can_target(&occupancy, black, Square::new(0, 3)));
    }

    #[test]
    fn test_rays_stop_at_first_blocker() {
        let board = Board::initial();
        let occupancy = board.occupancy();
        let rook = board.piece_at(Square::new(7, 0)).expect("rook");

        assert!(can_target(&occupancy, rook, Square::new(6, 0)), "Defends its own pawn");
        assert!(!can_target(&occupancy, rook, Square::new(5, 0)), "Pawn blocks the file");

        let vacated = occupancy.without(Square::new(6, 0));
        assert!(can_target(&vacated, rook, Square::new(1, 0)));
        assert!(!can_target(&vacated, rook, Square::new(0, 0)));
    }

    #[test]
    fn test_king_reach_is_one_square() {
        let board = Board::initial();
        let occupancy = Occupancy::default();
        let king = board.piece_at(Square::new(7, 4)).expect("king");

        assert!(can_target(&occupancy, king, Square::new(6, 3)));
        assert!(!can_target(&occupancy, king, Square::new(5, 4)));
    }

    #[test]
    fn test_knight_ignores_blockers() {
        let board = Board::initial();
        let occupancy = board.occupancy();
        let knight = board.piece_at(Square::new(7, 6)).expect("knight");

        assert!(can_target(&occupancy, knight, Square::new(5, 5)));
        assert!(can_target(&occupancy, knight, Square::new(6, 4)));
        assert!(!can_target(&occupancy, knight, Square::new(5, 6)));
    }
}
