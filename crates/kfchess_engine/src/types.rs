//! # Core Types - Pieces, Squares, Moves & Status
//!
//! ## Overview
//!
//! The simulation works on an 8x8 grid addressed by `(row, col)`, with row 0 at
//! player two's back rank and row 7 at player one's. Pieces live in an
//! index-stable arena (see [`crate::board::Board`]), so a [`PieceId`] is simply
//! the piece's index and stays valid for the whole game: captured pieces are
//! flagged, never removed.
//!
//! ## Squares vs Points
//!
//! A [`Square`] is an integer grid cell and is the only kind of position a
//! piece ever rests on. A [`Point`] is a fractional position used while
//! testing collisions between moving pieces, and for the knight's "floating"
//! midpoint. Points are never written back into a [`Piece`].
//!
//! ## Status Encoding
//!
//! [`GameStatus`] serializes to a signed byte that callers branch on:
//!
//! | Value | Meaning            |
//! |-------|--------------------|
//! | `0`   | game continues     |
//! | `1`   | player one won     |
//! | `2`   | player two won     |
//! | `-1`  | draw               |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EngineError, EngineResult};

/// Stable piece identifier (index into the board arena)
pub type PieceId = usize;

/// Player number, 1 or 2
pub type Player = u8;

/// Forward row direction for a player
#[inline]
pub fn forward(player: Player) -> i8 {
    if player == PLAYER_ONE {
        -1
    } else {
        1
    }
}

/// Row a player's pawns start on
#[inline]
pub fn pawn_start_row(player: Player) -> i8 {
    if player == PLAYER_ONE {
        6
    } else {
        1
    }
}

/// Row on which a player's pawns promote
#[inline]
pub fn promotion_row(player: Player) -> i8 {
    if player == PLAYER_ONE {
        0
    } else {
        BOARD_SIZE - 1
    }
}

/// The other player
#[inline]
pub fn opponent(player: Player) -> Player {
    if player == PLAYER_ONE {
        PLAYER_TWO
    } else {
        PLAYER_ONE
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    #[serde(rename = "P")]
    Pawn,
    #[serde(rename = "N")]
    Knight,
    #[serde(rename = "B")]
    Bishop,
    #[serde(rename = "R")]
    Rook,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl PieceType {
    /// Parse the single-letter code used in board layouts
    pub fn from_code(code: char) -> EngineResult<Self> {
        match code {
            'P' => Ok(PieceType::Pawn),
            'N' => Ok(PieceType::Knight),
            'B' => Ok(PieceType::Bishop),
            'R' => Ok(PieceType::Rook),
            'Q' => Ok(PieceType::Queen),
            'K' => Ok(PieceType::King),
            _ => Err(EngineError::UnknownPieceType { code }),
        }
    }

    pub fn code(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Material value used by the AI scorer
    pub fn value(self) -> f64 {
        match self {
            PieceType::Pawn => PAWN_VALUE,
            PieceType::Knight => KNIGHT_VALUE,
            PieceType::Bishop => BISHOP_VALUE,
            PieceType::Rook => ROOK_VALUE,
            PieceType::Queen => QUEEN_VALUE,
            PieceType::King => KING_VALUE,
        }
    }
}

/// Integer grid cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    #[inline]
    pub fn offset(self, row_dir: i8, col_dir: i8) -> Self {
        Square::new(self.row + row_dir, self.col + col_dir)
    }

    #[inline]
    pub fn to_point(self) -> Point {
        Point {
            row: self.row as f64,
            col: self.col as f64,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fractional board position, only used transiently
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub row: f64,
    pub col: f64,
}

impl Point {
    pub fn distance(self, other: Point) -> f64 {
        (self.row - other.row).hypot(self.col - other.col)
    }

    /// Linear blend: `weight` of `self`, the remainder of `other`
    pub fn blend(self, other: Point, weight: f64) -> Point {
        Point {
            row: self.row * weight + other.row * (1.0 - weight),
            col: self.col * weight + other.col * (1.0 - weight),
        }
    }
}

/// One step of a move path
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Waypoint {
    Square(Square),
    /// Off-grid point (knight midpoint), used for interpolation only
    Floating(Point),
}

impl Waypoint {
    pub fn point(self) -> Point {
        match self {
            Waypoint::Square(square) => square.to_point(),
            Waypoint::Floating(point) => point,
        }
    }

    pub fn square(self) -> Option<Square> {
        match self {
            Waypoint::Square(square) => Some(square),
            Waypoint::Floating(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub player: Player,
    pub row: i8,
    pub col: i8,
    pub captured: bool,
    pub moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, piece_type: PieceType, player: Player, row: i8, col: i8) -> Self {
        Piece {
            id,
            piece_type,
            player,
            row,
            col,
            captured: false,
            moved: false,
        }
    }

    #[inline]
    pub fn square(&self) -> Square {
        Square::new(self.row, self.col)
    }

    /// Copy of this piece standing on another square
    pub fn at(&self, square: Square) -> Piece {
        Piece {
            row: square.row,
            col: square.col,
            ..self.clone()
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.piece_type.value()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece_type.code(), self.player)
    }
}

/// An in-flight (or logged) movement of one piece
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[serde(rename = "pieceId")]
    pub piece: PieceId,
    pub player: Player,
    /// `path[0]` is the origin at issue time, the last entry the destination
    pub path: Vec<Waypoint>,
    pub starting_tick: u64,
}

impl Move {
    pub fn origin(&self) -> Option<Square> {
        self.path.first().and_then(|w| w.square())
    }

    pub fn destination(&self) -> Option<Square> {
        self.path.last().and_then(|w| w.square())
    }

    /// Ticks from start to arrival
    pub fn duration(&self, ticks_per_cell: u64) -> u64 {
        ticks_per_cell * (self.path.len() as u64).saturating_sub(1)
    }

    /// True when origin and destination share a column (pawn pushes)
    pub fn is_straight(&self) -> bool {
        match (self.origin(), self.destination()) {
            (Some(from), Some(to)) => from.col == to.col,
            _ => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cooldown {
    #[serde(rename = "pieceId")]
    pub piece: PieceId,
    pub player: Player,
    pub starting_tick: u64,
}

/// Who controls a seat
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Bot,
}

/// Game pace: how long moves and cooldowns take, and when draws kick in
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Standard,
    Lightning,
}

impl Speed {
    /// Ticks to cross one square in any direction (diagonals included)
    pub fn ticks_per_cell(self) -> u64 {
        match self {
            Speed::Standard => 10,
            Speed::Lightning => 2,
        }
    }

    /// Ticks a piece must rest after arriving
    pub fn cooldown_ticks(self) -> u64 {
        match self {
            Speed::Standard => 100,
            Speed::Lightning => 20,
        }
    }

    /// No draw can be declared before this tick
    pub fn min_draw_ticks(self) -> u64 {
        match self {
            Speed::Standard => 1800,
            Speed::Lightning => 900,
        }
    }

    /// Ticks without a capture after which the game is drawn
    pub fn draw_limit(self) -> u64 {
        match self {
            Speed::Standard => 900,
            Speed::Lightning => 450,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Speed::Standard => "standard",
            Speed::Lightning => "lightning",
        }
    }
}

impl FromStr for Speed {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Speed::Standard),
            "lightning" => Ok(Speed::Lightning),
            _ => Err(EngineError::UnknownSpeed { tag: s.to_string() }),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the game so far; see the module docs for the wire encoding
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(into = "i8", try_from = "i8")]
pub enum GameStatus {
    #[default]
    Continues,
    Winner(Player),
    Draw,
}

impl GameStatus {
    pub const CONTINUES: i8 = 0;
    pub const DRAW: i8 = -1;

    #[inline]
    pub fn is_finished(self) -> bool {
        self != GameStatus::Continues
    }

    pub fn code(self) -> i8 {
        match self {
            GameStatus::Continues => Self::CONTINUES,
            GameStatus::Winner(player) => player as i8,
            GameStatus::Draw => Self::DRAW,
        }
    }
}

impl From<GameStatus> for i8 {
    fn from(status: GameStatus) -> i8 {
        status.code()
    }
}

impl TryFrom<i8> for GameStatus {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            GameStatus::CONTINUES => Ok(GameStatus::Continues),
            GameStatus::DRAW => Ok(GameStatus::Draw),
            1 | 2 => Ok(GameStatus::Winner(code as Player)),
            _ => Err(format!("invalid game status code {code}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_codes() {
        for code in ['P', 'N', 'B', 'R', 'Q', 'K'] {
            let piece_type = PieceType::from_code(code).expect("known code");
            assert_eq!(piece_type.code(), code);
        }
        assert_eq!(
            PieceType::from_code('X'),
            Err(EngineError::UnknownPieceType { code: 'X' })
        );
    }

    #[test]
    fn test_speed_profiles() {
        assert_eq!(Speed::Standard.ticks_per_cell(), 10);
        assert_eq!(Speed::Standard.cooldown_ticks(), 100);
        assert_eq!(Speed::Lightning.ticks_per_cell(), 2);
        assert_eq!(Speed::Lightning.cooldown_ticks(), 20);
        assert_eq!("lightning".parse::<Speed>(), Ok(Speed::Lightning));
        assert!("glacial".parse::<Speed>().is_err());
    }

    #[test]
    fn test_status_encoding_is_stable() {
        //! Callers branch on the sign and value, so the codes must not drift
        assert_eq!(i8::from(GameStatus::Continues), 0);
        assert_eq!(i8::from(GameStatus::Winner(1)), 1);
        assert_eq!(i8::from(GameStatus::Winner(2)), 2);
        assert_eq!(i8::from(GameStatus::Draw), -1);
        assert_eq!(GameStatus::try_from(-1), Ok(GameStatus::Draw));
        assert!(GameStatus::try_from(3).is_err());

        let json = serde_json::to_string(&GameStatus::Winner(2)).expect("serialize");
        assert_eq!(json, "2");
    }

    #[test]
    fn test_move_straightness() {
        let push = Move {
            piece: 0,
            player: 1,
            path: vec![
                Waypoint::Square(Square::new(6, 4)),
                Waypoint::Square(Square::new(5, 4)),
            ],
            starting_tick: 0,
        };
        assert!(push.is_straight());
        assert_eq!(push.duration(10), 10);

        let diagonal = Move {
            path: vec![
                Waypoint::Square(Square::new(6, 4)),
                Waypoint::Square(Square::new(5, 5)),
            ],
            ..push
        };
        assert!(!diagonal.is_straight());
    }
}
