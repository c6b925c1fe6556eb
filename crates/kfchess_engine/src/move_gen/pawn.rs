//! Pawn paths
//!
//! ## Pawn Movement Rules
//!
//! - **Push**: one square forward (toward the opponent) into a square with no
//!   stationary piece
//! - **Double push**: two squares forward from the starting row, both squares
//!   clear; a double push can never capture
//! - **Capture**: one square diagonally forward, only onto an enemy piece that
//!   is standing still
//!
//! Promotion is not decided here; the tick engine promotes a pawn when it
//! reaches the far row.

use super::walk;
use crate::game::Game;
use crate::types::*;

pub(crate) fn pawn_path(game: &Game, piece: &Piece, to: Square) -> Option<Vec<Waypoint>> {
    let row_dir = forward(piece.player);
    let steps = (to.row - piece.row).abs();

    let mut can_capture = true;
    if to.row - piece.row != row_dir {
        if piece.row == pawn_start_row(piece.player) && to.row == piece.row + 2 * row_dir {
            can_capture = false;
        } else {
            return None;
        }
    }

    // straight ahead must be clear all the way
    if piece.col == to.col {
        if let Some(path) = walk(game, piece, (row_dir, 0), steps, false) {
            return Some(path);
        }
    }

    if can_capture && (to.col - piece.col).abs() == 1 {
        let target = game.stationary_piece_at(to)?;
        if target.player != piece.player {
            return walk(game, piece, (row_dir, to.col - piece.col), 1, true);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::game::Game;
    use crate::move_gen::compute_path;
    use crate::types::*;

    fn standard() -> Game {
        Game::new(Speed::Standard, [PlayerKind::Human, PlayerKind::Human])
    }

    #[test]
    fn test_single_and_double_push_from_start() {
        let game = standard();
        let pawn = game.board().piece_at(Square::new(6, 4)).expect("e-pawn").clone();

        assert!(compute_path(&game, &pawn, Square::new(5, 4)).is_some());
        let double = compute_path(&game, &pawn, Square::new(4, 4)).expect("double push");
        assert_eq!(double.path.len(), 2);
        assert!(
            compute_path(&game, &pawn, Square::new(3, 4)).is_none(),
            "Triple push is never legal"
        );
        assert!(
            compute_path(&game, &pawn, Square::new(7, 4)).is_none(),
            "Pawns cannot move backwards"
        );
    }

    #[test]
    fn test_black_pawns_move_down_the_board() {
        let game = standard();
        let pawn = game.board().piece_at(Square::new(1, 3)).expect("d-pawn").clone();

        assert!(compute_path(&game, &pawn, Square::new(2, 3)).is_some());
        assert!(compute_path(&game, &pawn, Square::new(3, 3)).is_some());
        assert!(compute_path(&game, &pawn, Square::new(0, 3)).is_none());
    }

    #[test]
    fn test_diagonal_requires_stationary_enemy() {
        let layout = "
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000P20000
            00000000P1000000
            0000000000000000
        ";
        let game = Game::with_board(
            Speed::Standard,
            [PlayerKind::Human, PlayerKind::Human],
            Board::from_layout(layout).expect("layout"),
        );
        let pawn = game.board().piece_at(Square::new(6, 4)).expect("pawn").clone();

        assert!(compute_path(&game, &pawn, Square::new(5, 5)).is_some(), "Capture right");
        assert!(
            compute_path(&game, &pawn, Square::new(5, 3)).is_none(),
            "Empty diagonal is not a move"
        );
    }

    #[test]
    fn test_departing_knight_does_not_hide_capture_target() {
        // knight still recorded on (3,3) while it flies off; the rook stands there
        let board = Board::new(vec![
            Piece::new(0, PieceType::Knight, 1, 3, 3),
            Piece::new(1, PieceType::Rook, 2, 3, 3),
            Piece::new(2, PieceType::Pawn, 1, 4, 2),
        ]);
        let mut game = Game::with_board(
            Speed::Standard,
            [PlayerKind::Human, PlayerKind::Human],
            board,
        );
        game.move_piece(0, 1, 5, 4).expect("knight jumps away");
        assert_eq!(game.board().piece_at(Square::new(3, 3)).map(|p| p.id), Some(0));

        let pawn = game.board().get(2).expect("pawn").clone();
        assert!(
            compute_path(&game, &pawn, Square::new(3, 3)).is_some(),
            "Pawn captures the standing rook, not the airborne knight"
        );
    }

    #[test]
    fn test_double_push_blocked_by_piece_in_between() {
        let layout = "
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            00000000N2000000
            00000000P1000000
            0000000000000000
        ";
        let game = Game::with_board(
            Speed::Standard,
            [PlayerKind::Human, PlayerKind::Human],
            Board::from_layout(layout).expect("layout"),
        );
        let pawn = game.board().piece_at(Square::new(6, 4)).expect("pawn").clone();

        assert!(compute_path(&game, &pawn, Square::new(4, 4)).is_none());
        assert!(
            compute_path(&game, &pawn, Square::new(5, 4)).is_none(),
            "Pawns cannot push into an occupied square"
        );
    }
}
