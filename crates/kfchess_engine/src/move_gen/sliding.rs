//! Sliding piece paths
//!
//! Bishops, rooks and queens travel one waypoint per square crossed, so a
//! longer slide takes proportionally longer. Each intermediate square must be
//! free of stationary pieces; the last may hold a stationary enemy.

use super::walk;
use crate::game::Game;
use crate::types::*;

pub(crate) fn bishop_path(game: &Game, piece: &Piece, to: Square) -> Option<Vec<Waypoint>> {
    let row_delta = to.row - piece.row;
    let col_delta = to.col - piece.col;
    if row_delta.abs() != col_delta.abs() || row_delta == 0 {
        return None;
    }

    walk(
        game,
        piece,
        (row_delta.signum(), col_delta.signum()),
        row_delta.abs(),
        true,
    )
}

pub(crate) fn rook_path(game: &Game, piece: &Piece, to: Square) -> Option<Vec<Waypoint>> {
    let row_delta = to.row - piece.row;
    let col_delta = to.col - piece.col;
    if row_delta != 0 && col_delta != 0 {
        return None;
    }

    let steps = row_delta.abs().max(col_delta.abs());
    if steps == 0 {
        return None;
    }

    walk(
        game,
        piece,
        (row_delta.signum(), col_delta.signum()),
        steps,
        true,
    )
}

pub(crate) fn queen_path(game: &Game, piece: &Piece, to: Square) -> Option<Vec<Waypoint>> {
    bishop_path(game, piece, to).or_else(|| rook_path(game, piece, to))
}
