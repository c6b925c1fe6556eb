//! # Bot Move Selection
//!
//! ## Overview
//!
//! Bots do not search. Each time a bot is due to move it:
//!
//! 1. takes one occupancy snapshot and builds a [`ThreatMap`] from it,
//! 2. lists every destination the validator accepts for each idle piece,
//! 3. scores each candidate with the weighted heuristic in [`scoring`],
//! 4. keeps the ones above the tier's threshold and picks among the best.
//!
//! The selector only reads the game. It can run right before the
//! authoritative tick on the same worker without any coordination.
//!
//! ## Randomness
//!
//! All randomness comes in through [`BotDraws`], supplied by the caller each
//! tick. Given the same game and the same draws, the same move comes out.
//!
//! ## Module Organization
//!
//! - `difficulty` - tier parameters
//! - `threat` - attacker and defender lists per piece
//! - `candidates` - destination enumeration
//! - `scoring` - the weighted heuristic

mod candidates;
mod difficulty;
pub mod scoring;
mod threat;

pub use difficulty::Difficulty;
pub use scoring::{score_move, ScoreBreakdown};
pub use threat::ThreatMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::SELECTION_MARGIN;
use crate::game::Game;
use crate::types::*;

/// Random numbers a bot may use on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotDraws {
    /// Decides whether this tick is a moving tick
    pub cadence: u64,
    /// Picks among equally good candidates
    pub choice: u64,
}

impl BotDraws {
    pub fn new(cadence: u64, choice: u64) -> Self {
        BotDraws { cadence, choice }
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        BotDraws {
            cadence: rng.random(),
            choice: rng.random(),
        }
    }
}

/// A move the bot wants to make
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BotMove {
    #[serde(rename = "pieceId")]
    pub piece: PieceId,
    pub row: i8,
    pub col: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bot {
    difficulty: Difficulty,
}

struct Candidate {
    piece: PieceId,
    to: Square,
    score: f64,
}

impl Bot {
    pub fn new(difficulty: Difficulty) -> Self {
        Bot { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Whether the bot considers moving on the game's current tick
    pub fn is_due(&self, game: &Game, draws: BotDraws) -> bool {
        let period = self.difficulty.period();
        let tick = game.current_tick() % period;
        if self.difficulty.fixed_cadence() {
            tick == 0
        } else {
            tick == draws.cadence % period
        }
    }

    /// Pick a move for `player`, or `None` to sit this tick out
    ///
    /// # Arguments
    ///
    /// * `game` - Engine state; never modified
    /// * `player` - Seat the bot plays for
    /// * `draws` - This tick's random numbers
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let bot = Bot::new(Difficulty::Advanced);
    /// if let Some(mv) = bot.select_move(&game, 2, BotDraws::from_rng(&mut rng)) {
    ///     game.move_piece(mv.piece, 2, mv.row, mv.col)?;
    /// }
    /// ```
    pub fn select_move(&self, game: &Game, player: Player, draws: BotDraws) -> Option<BotMove> {
        if game.status().is_finished() || !self.is_due(game, draws) {
            return None;
        }

        let mut candidates = self.candidates(game, player);
        let (pick, pool) = choose(&mut candidates, self.difficulty.breadth(), draws.choice)?;
        trace!(
            "[AI] player {} ({}) picks piece {} -> {} scoring {:.1} from {} candidates",
            player,
            self.difficulty,
            pick.piece,
            pick.to,
            pick.score,
            pool
        );

        Some(BotMove {
            piece: pick.piece,
            row: pick.to.row,
            col: pick.to.col,
        })
    }

    /// Scored candidates above this tier's threshold, in board order
    fn candidates(&self, game: &Game, player: Player) -> Vec<Candidate> {
        let occupancy = game.board().occupancy();
        let threats = ThreatMap::build(game.board(), &occupancy);
        let threshold = self.difficulty.threshold();

        let mut found = Vec::new();
        for piece in game.board().pieces_of(player) {
            if game.is_moving(piece.id) || game.on_cooldown(piece.id) {
                continue;
            }

            for to in candidates::destinations(game, piece) {
                let score = score_move(game, &threats, &occupancy, piece, to).total();
                if score > threshold {
                    found.push(Candidate {
                        piece: piece.id,
                        to,
                        score,
                    });
                }
            }
        }
        found
    }
}

/// Sort best first, then pick among everything within [`SELECTION_MARGIN`]
/// of the `breadth`-th best
///
/// Returns the pick and the size of the pool it was drawn from.
fn choose(candidates: &mut [Candidate], breadth: usize, choice: u64) -> Option<(&Candidate, usize)> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let nth = candidates.len().min(breadth).checked_sub(1)?;
    let cutoff = candidates[nth].score - SELECTION_MARGIN;
    let pool = candidates.iter().take_while(|c| c.score >= cutoff).count();

    Some((&candidates[(choice % pool as u64) as usize], pool))
}
