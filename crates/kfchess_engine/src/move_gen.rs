//! Move validation and path computation
//!
//! Given a piece and a destination, the validator either produces the ordered
//! list of waypoints the piece will travel through, or rejects the move by
//! returning `None`. Rejection is an ordinary outcome here; the engine turns it
//! into [`crate::error::MoveRejection::Illegal`].
//!
//! ## Occupancy Rules
//!
//! Movement is simultaneous, so blocking is judged against *stationary*
//! pieces only:
//!
//! - A piece that is currently mid-move never blocks a path.
//! - The final square may hold a stationary enemy (capture) but never a
//!   stationary own piece.
//! - A new path may not step onto a square where one of the same player's
//!   active moves ends, and its destination may not lie on the remaining path
//!   of any of that player's active moves. This keeps a player from sending two
//!   of their own pieces onto a collision course.
//!
//! ## Module Organization
//!
//! - `pawn` - pushes, double pushes and diagonal captures
//! - `knight` - L-shaped jumps through a floating midpoint
//! - `sliding` - bishop, rook and queen rays
//! - `king` - single steps and castling
//! - `attack` - threat detection used by the AI scorer

pub mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::can_target;

use crate::game::Game;
use crate::types::*;

/// Waypoints accepted by the validator
///
/// `path` excludes the origin square; the engine prepends it when the move is
/// registered. `castle` carries the rook's move when a king castles.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPath {
    pub path: Vec<Waypoint>,
    pub castle: Option<Move>,
}

impl ValidatedPath {
    fn plain(path: Vec<Waypoint>) -> Self {
        ValidatedPath { path, castle: None }
    }
}

/// Compute the path for `piece` to reach `to`, or `None` if it can't
///
/// Only the movement rules are checked here. Ownership, bounds, and whether the
/// piece is busy are checked by [`Game::move_piece`] before this is called.
pub fn compute_path(game: &Game, piece: &Piece, to: Square) -> Option<ValidatedPath> {
    match piece.piece_type {
        PieceType::Pawn => pawn::pawn_path(game, piece, to).map(ValidatedPath::plain),
        PieceType::Knight => knight::knight_path(game, piece, to).map(ValidatedPath::plain),
        PieceType::Bishop => sliding::bishop_path(game, piece, to).map(ValidatedPath::plain),
        PieceType::Rook => sliding::rook_path(game, piece, to).map(ValidatedPath::plain),
        PieceType::Queen => sliding::queen_path(game, piece, to).map(ValidatedPath::plain),
        PieceType::King => king::king_path(game, piece, to),
    }
}

/// Walk `steps` squares from `piece` in direction `(row_dir, col_dir)`
///
/// Every square on the way must be free of stationary pieces. When `capture`
/// is set the last square may hold a stationary enemy.
pub(crate) fn walk(
    game: &Game,
    piece: &Piece,
    (row_dir, col_dir): (i8, i8),
    steps: i8,
    capture: bool,
) -> Option<Vec<Waypoint>> {
    let mut path = Vec::with_capacity(steps.max(0) as usize);
    let mut last = piece.square();

    for i in 1..=steps {
        let square = piece.square().offset(row_dir * i, col_dir * i);
        if !square.in_bounds() {
            return None;
        }

        if let Some(blocker) = game.stationary_piece_at(square) {
            if !capture || i != steps || blocker.player == piece.player {
                return None;
            }
        }

        // another of our moves already ends here
        if game.own_move_ends_at(piece.player, square) {
            return None;
        }

        path.push(Waypoint::Square(square));
        last = square;
    }

    if game.crosses_future_path(piece.player, last) {
        return None;
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn game_from(layout: &str) -> Game {
        Game::with_board(
            Speed::Standard,
            [PlayerKind::Human, PlayerKind::Human],
            Board::from_layout(layout).expect("test layout"),
        )
    }

    fn squares(path: &[Waypoint]) -> Vec<Option<Square>> {
        path.iter().map(|w| w.square()).collect()
    }

    const OPEN_BOARD: &str = "
        0000000000000000
        0000000000000000
        0000000000000000
        00000000Q1000000
        0000000000000000
        0000000000000000
        0000000000000000
        0000000000000000
    ";

    #[test]
    fn test_queen_slides_in_eight_directions() {
        let game = game_from(OPEN_BOARD);
        let queen = game.board().piece_at(Square::new(3, 4)).expect("queen").clone();

        let diagonal = compute_path(&game, &queen, Square::new(0, 7)).expect("diagonal slide");
        assert_eq!(
            squares(&diagonal.path),
            vec![
                Some(Square::new(2, 5)),
                Some(Square::new(1, 6)),
                Some(Square::new(0, 7))
            ]
        );

        let file = compute_path(&game, &queen, Square::new(7, 4)).expect("file slide");
        assert_eq!(file.path.len(), 4);

        assert!(
            compute_path(&game, &queen, Square::new(5, 5)).is_none(),
            "Knight-shaped offsets are not queen moves"
        );
    }

    #[test]
    fn test_stationary_piece_blocks_slide() {
        let layout = "
            0000000000000000
            0000000000000000
            0000000000000000
            00000000Q1000000
            00000000P1000000
            0000000000000000
            0000000000000000
            00000000P2000000
        ";
        let game = game_from(layout);
        let queen = game.board().piece_at(Square::new(3, 4)).expect("queen").clone();

        assert!(compute_path(&game, &queen, Square::new(6, 4)).is_none());
        assert!(
            compute_path(&game, &queen, Square::new(4, 4)).is_none(),
            "Own piece on the destination blocks"
        );
    }

    #[test]
    fn test_slider_may_capture_on_final_square() {
        let layout = "
            0000000000000000
            0000000000000000
            0000000000000000
            00000000R1000000
            0000000000000000
            0000000000000000
            00000000P2000000
            0000000000000000
        ";
        let game = game_from(layout);
        let rook = game.board().piece_at(Square::new(3, 4)).expect("rook").clone();

        let capture = compute_path(&game, &rook, Square::new(6, 4)).expect("capture");
        assert_eq!(capture.path.last().and_then(|w| w.square()), Some(Square::new(6, 4)));
        assert!(
            compute_path(&game, &rook, Square::new(7, 4)).is_none(),
            "Cannot slide through the enemy pawn"
        );
    }
}
