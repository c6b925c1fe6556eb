//! # Engine Constants - Geometry, Timing & Heuristic Weights
//!
//! ## Overview
//!
//! This module centralizes the fixed numbers the simulation depends on: board
//! geometry, the collision thresholds used by capture resolution, draw timing
//! for each speed, and the material values and weights used by the AI scorer.
//!
//! ## Collision Geometry
//!
//! Pieces are compared by Euclidean distance between their (possibly
//! interpolated) positions, measured in squares:
//!
//! - **Proximity**: `0.71` is roughly half of a square's diagonal. Pairs further
//!   apart than this are never considered.
//! - **Capture**: `0.4001` is the true capture threshold. At least one of the
//!   current or half-tick lookahead distances has to fall below it.
//!
//! ## Material Values
//!
//! The scorer uses plain pawn units rather than centipawns:
//!
//! | Piece  | Value |
//! |--------|-------|
//! | Pawn   | 1     |
//! | Knight | 3     |
//! | Bishop | 3     |
//! | Rook   | 5     |
//! | Queen  | 9     |
//! | King   | 100   |
//!
//! The king is worth more than every other piece combined, since losing it
//! ends the game.

/// Board width and height
pub const BOARD_SIZE: i8 = 8;

/// Player one (white, moves toward row 0)
pub const PLAYER_ONE: u8 = 1;
/// Player two (black, moves toward row 7)
pub const PLAYER_TWO: u8 = 2;

/// Pairs further apart than this are skipped during capture resolution
pub const PROXIMITY_THRESHOLD: f64 = 0.71;
/// Distance below which a collision becomes a capture
pub const CAPTURE_THRESHOLD: f64 = 0.4001;
/// Fraction of its traversal a knight must finish before it can capture
pub const KNIGHT_CAPTURE_PROGRESS: f64 = 0.85;
/// Sub-tick offset used for closing/opening lookahead
pub const LOOKAHEAD_TICKS: f64 = 0.5;

/// Seconds without a human move before a campaign game is drawn
pub const NO_MOVE_TIMEOUT_SECS: u64 = 120;

pub const PAWN_VALUE: f64 = 1.0;
pub const KNIGHT_VALUE: f64 = 3.0;
pub const BISHOP_VALUE: f64 = 3.0;
pub const ROOK_VALUE: f64 = 5.0;
pub const QUEEN_VALUE: f64 = 9.0;
pub const KING_VALUE: f64 = 100.0;

pub const ADVANCE_WEIGHT: f64 = 2.0;
pub const CENTER_WEIGHT: f64 = 1.0;
pub const CAPTURE_WEIGHT: f64 = 16.0;
pub const PRESSURE_WEIGHT: f64 = 8.0;
pub const VULNERABILITY_WEIGHT: f64 = 12.0;
pub const PROTECTION_WEIGHT: f64 = 4.0;

/// Advance score for a pawn move that promotes (largest possible advance)
pub const PROMOTION_ADVANCE: f64 = ((BOARD_SIZE - 1) * 2) as f64;
/// Pressure on a defended enemy piece only counts for this fraction of its value
pub const DEFENDED_PRESSURE_FACTOR: f64 = 0.5;
/// Candidates within this margin of the n-th best score share the random pick
pub const SELECTION_MARGIN: f64 = 0.5;
/// Column center used by the centralization term
pub const CENTER_COL: f64 = 3.5;

pub const KNIGHT_DIRS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Standard starting position, two characters per square (type + player)
pub const INITIAL_LAYOUT: &str = "R2N2B2Q2K2B2N2R2
P2P2P2P2P2P2P2P2
0000000000000000
0000000000000000
0000000000000000
0000000000000000
P1P1P1P1P1P1P1P1
R1N1B1Q1K1B1N1R1";
