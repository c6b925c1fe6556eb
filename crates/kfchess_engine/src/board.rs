//! Board arena and occupancy queries
//!
//! The board is an unordered, index-stable collection of pieces. Pieces are
//! appended once when the board is built and never removed; a capture only
//! flips [`Piece::captured`]. Moves and cooldowns refer to pieces by
//! [`PieceId`], which is the arena index.
//!
//! ## Layout Format
//!
//! Boards are built from eight text rows of sixteen characters, two per
//! square: a piece code followed by the owning player, or `00` for empty.
//!
//! ```text
//! R2N2B2Q2K2B2N2R2
//! P2P2P2P2P2P2P2P2
//! 0000000000000000
//! ...
//! ```
//!
//! Leading and trailing whitespace on each row is ignored, as are blank rows.

use std::fmt;

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::types::*;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: Vec<Piece>,
}

impl Board {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Board { pieces }
    }

    /// Standard starting position
    ///
    /// Pieces are numbered row by row, left to right, the same order
    /// [`Board::from_layout`] produces for [`INITIAL_LAYOUT`].
    pub fn initial() -> Self {
        let mut pieces = Vec::with_capacity(32);
        let rows: [(i8, Player, bool); 4] = [
            (0, PLAYER_TWO, true),
            (1, PLAYER_TWO, false),
            (6, PLAYER_ONE, false),
            (7, PLAYER_ONE, true),
        ];

        for (row, player, back_rank) in rows {
            for col in 0..BOARD_SIZE {
                let piece_type = if back_rank {
                    BACK_RANK[col as usize]
                } else {
                    PieceType::Pawn
                };
                pieces.push(Piece::new(pieces.len(), piece_type, player, row, col));
            }
        }

        Board { pieces }
    }

    /// Parse a textual layout (see module docs)
    pub fn from_layout(layout: &str) -> EngineResult<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(EngineError::MalformedLayout {
                message: format!("expected {} rows, found {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut pieces = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != 2 * BOARD_SIZE as usize {
                return Err(EngineError::MalformedLayout {
                    message: format!("row {} has {} characters, expected 16", row, cells.len()),
                });
            }

            for (col, cell) in cells.chunks(2).enumerate() {
                if cell == ['0', '0'] {
                    continue;
                }

                let piece_type = PieceType::from_code(cell[0])?;
                let player = match cell[1] {
                    '1' => PLAYER_ONE,
                    '2' => PLAYER_TWO,
                    other => {
                        return Err(EngineError::InvalidPlayer {
                            player: other,
                            row,
                            col,
                        })
                    }
                };

                pieces.push(Piece::new(
                    pieces.len(),
                    piece_type,
                    player,
                    row as i8,
                    col as i8,
                ));
            }
        }

        Ok(Board { pieces })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id)
    }

    /// First uncaptured piece standing on `square`
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| !p.captured && p.row == square.row && p.col == square.col)
    }

    /// Uncaptured pieces belonging to `player`
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |p| !p.captured && p.player == player)
    }

    /// Snapshot of which squares hold an uncaptured piece
    pub fn occupancy(&self) -> Occupancy {
        let mut occupancy = Occupancy::default();
        for piece in self.pieces.iter().filter(|p| !p.captured) {
            occupancy.place(piece.square(), piece.id);
        }
        occupancy
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupancy = self.occupancy();
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..BOARD_SIZE {
                match occupancy.get(Square::new(row, col)).and_then(|id| self.get(id)) {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => f.write_str("00")?,
                }
            }
        }
        Ok(())
    }
}

/// Square -> piece lookup table, cheap to copy and tweak
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    cells: [[Option<PieceId>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Occupancy {
    #[inline]
    pub fn get(&self, square: Square) -> Option<PieceId> {
        if !square.in_bounds() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    pub fn place(&mut self, square: Square, id: PieceId) {
        if square.in_bounds() {
            self.cells[square.row as usize][square.col as usize] = Some(id);
        }
    }

    pub fn vacate(&mut self, square: Square) {
        if square.in_bounds() {
            self.cells[square.row as usize][square.col as usize] = None;
        }
    }

    /// Copy with `square` emptied
    pub fn without(&self, square: Square) -> Occupancy {
        let mut copy = *self;
        copy.vacate(square);
        copy
    }
}
