//! # Tick Engine
//!
//! One call to [`Game::advance`] moves the simulation forward by exactly one
//! tick. The step runs to completion before returning, so callers never see a
//! half-applied tick.
//!
//! ## Step Order
//!
//! 1. **Positions**: every moving piece snaps to the waypoint its elapsed
//!    ticks have reached; pawns reaching the far row promote.
//! 2. **Captures**: each moving piece is compared against every enemy using
//!    interpolated positions now and half a tick ahead.
//! 3. **Move retirement**: finished moves become cooldowns; moves of captured
//!    pieces are dropped.
//! 4. **Cooldown retirement**: expired cooldowns are cleared.
//! 5. **Termination**: king capture, capture-clock draw, or campaign idle draw.
//!
//! ## Capture Rules
//!
//! - Enemies farther than [`PROXIMITY_THRESHOLD`] are ignored outright.
//! - A knight is airborne until the last half-cell of its jump and cannot
//!   capture before [`KNIGHT_CAPTURE_PROGRESS`] of its traversal.
//! - A pawn moving straight never captures; on collision it is the one taken,
//!   except against a straight-moving pawn that started earlier.
//! - Between two movers the one closing in on the other wins. When both close
//!   or both open, the earlier (or equal) starting tick wins.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info};
use web_time::Instant;

use super::Game;
use crate::constants::*;
use crate::events::GameEvent;
use crate::types::*;

/// A capture decided during step 2, applied right after
struct Capture {
    captor: PieceId,
    victim: PieceId,
}

impl Game {
    /// Run one simulation step using the current wall-clock time
    ///
    /// # Returns
    ///
    /// The status after the step and the events it produced, in order. A game
    /// that is already finished is left untouched and yields no events.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let (status, events) = game.advance();
    /// if status.is_finished() {
    ///     sink.game_over(status);
    /// }
    /// ```
    pub fn advance(&mut self) -> (GameStatus, Vec<GameEvent>) {
        self.advance_at(Instant::now())
    }

    /// Run one simulation step as if the wall clock read `now`
    ///
    /// Only the campaign idle check looks at `now`; everything else depends on
    /// the tick counter alone.
    pub fn advance_at(&mut self, now: Instant) -> (GameStatus, Vec<GameEvent>) {
        if self.status.is_finished() {
            return (self.status, Vec::new());
        }

        self.current_tick += 1;
        self.last_tick_at = now;

        let mut events = Vec::new();
        let moving = self.update_positions(&mut events);
        self.resolve_captures(&moving, &mut events);
        self.retire_moves(&mut events);
        self.retire_cooldowns(&mut events);
        self.status = self.check_termination(now);

        if self.status.is_finished() {
            info!(
                "[ENGINE] game finished at tick {} with status {}",
                self.current_tick,
                self.status.code()
            );
        }

        (self.status, events)
    }

    /// Snap moving pieces to their current waypoint
    ///
    /// Returns piece id -> index into `active_moves` for every piece still in
    /// motion this tick.
    fn update_positions(&mut self, events: &mut Vec<GameEvent>) -> HashMap<PieceId, usize> {
        let mut moving = HashMap::with_capacity(self.active_moves.len());

        for (index, mv) in self.active_moves.iter().enumerate() {
            let cells = ((self.current_tick - mv.starting_tick) / self.ticks_per_cell) as usize;
            let Some(waypoint) = mv.path.get(cells) else {
                continue;
            };
            moving.insert(mv.piece, index);

            let Some(piece) = self.board.get_mut(mv.piece) else {
                continue;
            };

            // knights stay put until they land
            if let Some(square) = waypoint.square() {
                piece.row = square.row;
                piece.col = square.col;
            }

            if piece.piece_type == PieceType::Pawn && piece.row == promotion_row(piece.player) {
                piece.piece_type = PieceType::Queen;
                debug!("[ENGINE] piece {} promoted at {}", piece.id, piece.square());
                events.push(GameEvent::Promotion {
                    piece: piece.clone(),
                });
            }
        }

        moving
    }

    fn resolve_captures(&mut self, moving: &HashMap<PieceId, usize>, events: &mut Vec<GameEvent>) {
        for index in 0..self.active_moves.len() {
            let Some(capture) = self.find_capture(index, moving) else {
                continue;
            };

            if let Some(victim) = self.board.get_mut(capture.victim) {
                victim.captured = true;
            }
            self.last_capture_tick = self.current_tick;

            if let (Some(captor), Some(victim)) = (
                self.board.get(capture.captor),
                self.board.get(capture.victim),
            ) {
                debug!(
                    "[ENGINE] tick {}: {} at {} captured {} at {}",
                    self.current_tick,
                    captor,
                    captor.square(),
                    victim,
                    victim.square()
                );
                events.push(GameEvent::Capture {
                    piece: captor.clone(),
                    target: victim.clone(),
                });
            }
        }
    }

    /// First capture involving the move at `index`, if any
    fn find_capture(&self, index: usize, moving: &HashMap<PieceId, usize>) -> Option<Capture> {
        let mv = &self.active_moves[index];
        let piece = self.board.get(mv.piece)?;
        if piece.captured || !moving.contains_key(&piece.id) {
            return None;
        }

        let now = self.current_tick as f64;
        let position = self.interpolate(mv, now)?;
        let pawn_push = piece.piece_type == PieceType::Pawn && mv.is_straight();

        for other in self.board.pieces.iter() {
            if other.player == piece.player || other.captured {
                continue;
            }

            let other_move = moving.get(&other.id).map(|&i| &self.active_moves[i]);
            let other_position = match other_move {
                Some(other_move) => match self.interpolate(other_move, now) {
                    Some(point) => point,
                    None => continue,
                },
                None => other.square().to_point(),
            };

            let distance = position.distance(other_position);
            if distance > PROXIMITY_THRESHOLD {
                continue;
            }

            if piece.piece_type == PieceType::Knight {
                let progress =
                    (self.current_tick - mv.starting_tick) as f64 / mv.duration(self.ticks_per_cell) as f64;
                if progress < KNIGHT_CAPTURE_PROGRESS {
                    continue;
                }
            }

            let Some(other_move) = other_move else {
                if distance < CAPTURE_THRESHOLD {
                    return Some(if pawn_push {
                        Capture {
                            captor: other.id,
                            victim: piece.id,
                        }
                    } else {
                        Capture {
                            captor: piece.id,
                            victim: other.id,
                        }
                    });
                }
                continue;
            };

            let (Some(ahead), Some(other_ahead)) = (
                self.interpolate(mv, now + LOOKAHEAD_TICKS),
                self.interpolate(other_move, now + LOOKAHEAD_TICKS),
            ) else {
                continue;
            };
            let closing_distance = ahead.distance(other_position);
            let other_closing_distance = position.distance(other_ahead);

            if distance.min(closing_distance).min(other_closing_distance) > CAPTURE_THRESHOLD {
                continue;
            }

            if pawn_push {
                let other_pawn_push = other.piece_type == PieceType::Pawn && other_move.is_straight();
                if !other_pawn_push || other_move.starting_tick < mv.starting_tick {
                    return Some(Capture {
                        captor: other.id,
                        victim: piece.id,
                    });
                }
                continue;
            }

            let closing = closing_distance < distance;
            let opening = closing_distance > distance;
            let other_closing = other_closing_distance < distance;
            let other_opening = other_closing_distance > distance;

            let wins = if closing && other_opening {
                true
            } else if opening && other_closing {
                // the other mover takes this one on its own turn
                false
            } else {
                mv.starting_tick <= other_move.starting_tick
            };

            if wins {
                return Some(Capture {
                    captor: piece.id,
                    victim: other.id,
                });
            }
        }

        None
    }

    /// Fractional position of `mv`'s piece at tick `at`
    ///
    /// `None` while a knight is airborne: before the last half-cell of its
    /// jump it cannot collide with anything.
    pub(crate) fn interpolate(&self, mv: &Move, at: f64) -> Option<Point> {
        let tpc = self.ticks_per_cell;
        let total = mv.duration(tpc);
        let elapsed = at - mv.starting_tick as f64;

        let is_knight = self
            .board
            .get(mv.piece)
            .is_some_and(|p| p.piece_type == PieceType::Knight);
        if is_knight && elapsed < total.saturating_sub(tpc / 2) as f64 {
            return None;
        }

        let last = mv.path.len().checked_sub(1)?;
        let cells = ((elapsed.max(0.0) as u64) / tpc) as usize;
        let cells = cells.min(last);

        let from = mv.path[cells].point();
        let to = mv.path[(cells + 1).min(last)].point();
        let weight = 1.0 - elapsed.rem_euclid(tpc as f64) / tpc as f64;

        Some(from.blend(to, weight))
    }

    fn retire_moves(&mut self, events: &mut Vec<GameEvent>) {
        let mut still_moving = Vec::with_capacity(self.active_moves.len());
        let mut cooldowns = Vec::new();

        for mv in std::mem::take(&mut self.active_moves) {
            let Some(piece) = self.board.get(mv.piece) else {
                continue;
            };
            if piece.captured {
                continue;
            }

            if self.current_tick - mv.starting_tick >= mv.duration(self.ticks_per_cell) {
                cooldowns.push(Cooldown {
                    piece: mv.piece,
                    player: mv.player,
                    starting_tick: self.current_tick,
                });
                events.push(GameEvent::StartCooldown {
                    piece: piece.clone(),
                });
            } else {
                still_moving.push(mv);
            }
        }

        self.active_moves = still_moving;
        cooldowns.append(&mut self.cooldowns);
        self.cooldowns = cooldowns;
    }

    fn retire_cooldowns(&mut self, events: &mut Vec<GameEvent>) {
        let current_tick = self.current_tick;
        let cooldown_ticks = self.cooldown_ticks;
        let board = &self.board;

        self.cooldowns.retain(|cooldown| {
            let Some(piece) = board.get(cooldown.piece) else {
                return false;
            };
            if piece.captured {
                return false;
            }
            // fresh cooldowns started this tick are never expired here
            if current_tick - cooldown.starting_tick < cooldown_ticks {
                return true;
            }
            events.push(GameEvent::EndCooldown {
                piece: piece.clone(),
            });
            false
        });
    }

    fn check_termination(&self, now: Instant) -> GameStatus {
        if let Some(king) = self
            .board
            .pieces
            .iter()
            .find(|p| p.piece_type == PieceType::King && p.captured)
        {
            return GameStatus::Winner(opponent(king.player));
        }

        let idle = if self.is_campaign() {
            now.saturating_duration_since(self.last_move_at)
                >= Duration::from_secs(NO_MOVE_TIMEOUT_SECS)
        } else {
            self.current_tick >= self.speed.min_draw_ticks()
                && self.current_tick - self.last_capture_tick > self.speed.draw_limit()
        };

        if idle {
            GameStatus::Draw
        } else {
            GameStatus::Continues
        }
    }
}
