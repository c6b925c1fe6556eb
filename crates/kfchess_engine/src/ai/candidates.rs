//! Candidate destinations for an idle piece
//!
//! Every destination is confirmed by the move validator, so anything listed
//! here would be accepted by [`crate::game::Game::move_piece`] right now.
//! Rays stop at the first square the validator rejects.

use crate::constants::*;
use crate::game::Game;
use crate::move_gen::compute_path;
use crate::types::*;

pub(crate) fn destinations(game: &Game, piece: &Piece) -> Vec<Square> {
    let mut found = Vec::new();
    let from = piece.square();
    let accepts = |to: Square| to.in_bounds() && compute_path(game, piece, to).is_some();

    match piece.piece_type {
        PieceType::Pawn => {
            let dir = forward(piece.player);
            for col_dir in [-1, 0, 1] {
                let to = from.offset(dir, col_dir);
                if accepts(to) {
                    found.push(to);
                }
            }
            if piece.row == pawn_start_row(piece.player) {
                let to = from.offset(2 * dir, 0);
                if accepts(to) {
                    found.push(to);
                }
            }
        }
        PieceType::Knight => {
            found.extend(
                KNIGHT_DIRS
                    .iter()
                    .map(|&(row_dir, col_dir)| from.offset(row_dir, col_dir))
                    .filter(|&to| accepts(to)),
            );
        }
        PieceType::Bishop | PieceType::Rook | PieceType::Queen | PieceType::King => {
            let limit = if piece.piece_type == PieceType::King {
                1
            } else {
                BOARD_SIZE
            };
            let diagonal = matches!(
                piece.piece_type,
                PieceType::Bishop | PieceType::Queen | PieceType::King
            );
            let straight = matches!(
                piece.piece_type,
                PieceType::Rook | PieceType::Queen | PieceType::King
            );

            let rays = BISHOP_DIRS
                .iter()
                .filter(|_| diagonal)
                .chain(ROOK_DIRS.iter().filter(|_| straight));
            for &(row_dir, col_dir) in rays {
                for i in 1..=limit {
                    let to = from.offset(row_dir * i, col_dir * i);
                    if !accepts(to) {
                        break;
                    }
                    found.push(to);
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_opening_candidates() {
        let game = Game::new(Speed::Standard, [PlayerKind::Bot; 2]);
        let board = game.board();

        let pawn = board.piece_at(Square::new(6, 4)).expect("pawn");
        assert_eq!(
            destinations(&game, pawn),
            vec![Square::new(5, 4), Square::new(4, 4)]
        );

        let knight = board.piece_at(Square::new(7, 1)).expect("knight");
        let mut jumps = destinations(&game, knight);
        jumps.sort_by_key(|s| (s.row, s.col));
        assert_eq!(jumps, vec![Square::new(5, 0), Square::new(5, 2)]);

        let rook = board.piece_at(Square::new(7, 0)).expect("rook");
        assert!(destinations(&game, rook).is_empty(), "Rook is boxed in");
    }

    #[test]
    fn test_lone_queen_reaches_whole_board() {
        let layout = "
            0000000000000000
            0000000000000000
            0000000000000000
            000000Q100000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
        ";
        let board = Board::from_layout(layout).expect("layout");
        let game = Game::with_board(Speed::Standard, [PlayerKind::Bot; 2], board);
        let queen = game.board().piece_at(Square::new(3, 3)).expect("queen");

        assert_eq!(destinations(&game, queen).len(), 27);
    }
}
