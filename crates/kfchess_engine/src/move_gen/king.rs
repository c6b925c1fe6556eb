//! King paths and castling
//!
//! Kings step one square in any direction using the queen rule. Castling is
//! requested by sending an unmoved king two files toward an unmoved rook of
//! the same player (column 6 on the king side, column 2 on the queen side).
//! Both the king's and the rook's paths must pass the usual occupancy checks;
//! on success the rook's move is attached to the result and starts on the same
//! tick as the king's.

use super::sliding::{queen_path, rook_path};
use super::ValidatedPath;
use crate::game::Game;
use crate::types::*;

const KING_SIDE_COL: i8 = 6;
const QUEEN_SIDE_COL: i8 = 2;

pub(crate) fn king_path(game: &Game, piece: &Piece, to: Square) -> Option<ValidatedPath> {
    let row_delta = (to.row - piece.row).abs();
    let col_delta = (to.col - piece.col).abs();

    if row_delta > 1 || col_delta > 1 {
        if !piece.moved && row_delta == 0 && (to.col == KING_SIDE_COL || to.col == QUEEN_SIDE_COL) {
            return castle_path(game, piece, to);
        }
        return None;
    }

    queen_path(game, piece, to).map(|path| ValidatedPath { path, castle: None })
}

fn castle_path(game: &Game, king: &Piece, to: Square) -> Option<ValidatedPath> {
    let (rook_col, rook_to_col) = if to.col == QUEEN_SIDE_COL { (0, 3) } else { (7, 5) };

    let rook = game.board().piece_at(Square::new(king.row, rook_col))?;
    if rook.piece_type != PieceType::Rook || rook.player != king.player || rook.moved {
        return None;
    }

    let king_path = rook_path(game, king, to)?;
    let rook_steps = rook_path(game, rook, Square::new(king.row, rook_to_col))?;

    let mut path = Vec::with_capacity(rook_steps.len() + 1);
    path.push(Waypoint::Square(rook.square()));
    path.extend(rook_steps);

    Some(ValidatedPath {
        path: king_path,
        castle: Some(Move {
            piece: rook.id,
            player: rook.player,
            path,
            starting_tick: game.current_tick(),
        }),
    })
}
