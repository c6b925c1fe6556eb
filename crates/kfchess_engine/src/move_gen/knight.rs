//! Knight paths
//!
//! A knight travels for two cells' worth of time, passing through an off-grid
//! midpoint halfway between origin and destination. The midpoint is used only
//! to interpolate its position; it never blocks and is never blocked. Only the
//! landing square is checked for occupancy.

use super::walk;
use crate::game::Game;
use crate::types::*;

pub(crate) fn knight_path(game: &Game, piece: &Piece, to: Square) -> Option<Vec<Waypoint>> {
    let row_delta = to.row - piece.row;
    let col_delta = to.col - piece.col;
    if !matches!((row_delta.abs(), col_delta.abs()), (1, 2) | (2, 1)) {
        return None;
    }

    walk(game, piece, (row_delta, col_delta), 1, true)?;

    let midpoint = Point {
        row: (to.row + piece.row) as f64 / 2.0,
        col: (to.col + piece.col) as f64 / 2.0,
    };
    Some(vec![Waypoint::Floating(midpoint), Waypoint::Square(to)])
}

#[cfg(test)]
mod tests {
    use crate::game::Game;
    use crate::move_gen::compute_path;
    use crate::types::*;

    #[test]
    fn test_knight_jumps_over_pieces_through_midpoint() {
        let game = Game::new(Speed::Standard, [PlayerKind::Human, PlayerKind::Human]);
        let knight = game.board().piece_at(Square::new(7, 1)).expect("knight").clone();

        let jump = compute_path(&game, &knight, Square::new(5, 2)).expect("Nc3");
        assert_eq!(
            jump.path,
            vec![
                Waypoint::Floating(Point { row: 6.0, col: 1.5 }),
                Waypoint::Square(Square::new(5, 2)),
            ]
        );

        assert!(
            compute_path(&game, &knight, Square::new(6, 3)).is_none(),
            "Cannot land on own pawn"
        );
        assert!(compute_path(&game, &knight, Square::new(5, 1)).is_none());
    }
}
