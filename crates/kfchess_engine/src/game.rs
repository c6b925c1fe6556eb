//! # Game - Continuous-Time Engine State
//!
//! ## Overview
//!
//! A [`Game`] owns the board and every in-flight [`Move`] and [`Cooldown`].
//! Players never take turns: any idle piece can be commanded at any time with
//! [`Game::move_piece`], and the simulation moves forward one tick per
//! [`Game::advance`] call (see the `tick` submodule).
//!
//! ## Piece Lifecycle
//!
//! ```text
//! Idle --move_piece--> Moving --arrive--> Cooldown --expire--> Idle
//!   \                    |                   |
//!    `-------------------+-------------------+---> Captured (absorbing)
//! ```
//!
//! A piece is referenced by at most one active move or cooldown, never both.
//!
//! ## Single Writer
//!
//! All mutation goes through `&mut self`; the type has no interior mutability,
//! so whoever owns the game (or holds its lock) is the only writer. Readers
//! such as the AI selector take `&Game` and cannot change it.

mod tick;

use chrono::{DateTime, Utc};
use tracing::debug;
use web_time::Instant;

use crate::board::Board;
use crate::campaign;
use crate::constants::*;
use crate::error::{EngineResult, MoveRejection};
use crate::move_gen;
use crate::snapshot::GameSnapshot;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) speed: Speed,
    pub(crate) players: [PlayerKind; 2],
    pub(crate) board: Board,
    pub(crate) starting_board: Board,
    pub(crate) campaign_level: Option<usize>,

    pub(crate) ticks_per_cell: u64,
    pub(crate) cooldown_ticks: u64,
    pub(crate) players_ready: [bool; 2],

    pub(crate) active_moves: Vec<Move>,
    pub(crate) cooldowns: Vec<Cooldown>,
    pub(crate) move_log: Vec<Move>,
    pub(crate) current_tick: u64,
    pub(crate) last_capture_tick: u64,

    pub(crate) last_move_at: Instant,
    pub(crate) last_tick_at: Instant,
    pub(crate) start_time: DateTime<Utc>,
    pub(crate) started: bool,
    pub(crate) status: GameStatus,
}

impl Game {
    /// New game from the standard starting position
    pub fn new(speed: Speed, players: [PlayerKind; 2]) -> Self {
        Self::with_board(speed, players, Board::initial())
    }

    /// New game from a custom board
    pub fn with_board(speed: Speed, players: [PlayerKind; 2], board: Board) -> Self {
        let now = Instant::now();
        Game {
            speed,
            players,
            starting_board: board.clone(),
            board,
            campaign_level: None,
            ticks_per_cell: speed.ticks_per_cell(),
            cooldown_ticks: speed.cooldown_ticks(),
            players_ready: [false; 2],
            active_moves: Vec::new(),
            cooldowns: Vec::new(),
            move_log: Vec::new(),
            current_tick: 0,
            last_capture_tick: 0,
            last_move_at: now,
            last_tick_at: now,
            start_time: Utc::now(),
            started: false,
            status: GameStatus::Continues,
        }
    }

    /// New game on a built-in campaign board
    ///
    /// Campaign games are never drawn by the capture clock; they are drawn when
    /// no human has moved for [`NO_MOVE_TIMEOUT_SECS`].
    pub fn for_campaign(level: usize, players: [PlayerKind; 2]) -> EngineResult<Self> {
        let campaign_level = campaign::level(level)?;
        let board = Board::from_layout(campaign_level.layout)?;
        let mut game = Self::with_board(campaign_level.speed, players, board);
        game.campaign_level = Some(level);
        Ok(game)
    }

    /// Fresh game with the same speed, players and board source
    ///
    /// Nothing carries over except configuration; the old game stays as it was.
    pub fn restart(&self) -> EngineResult<Self> {
        match self.campaign_level {
            Some(level) => Self::for_campaign(level, self.players),
            None => Ok(Self::with_board(
                self.speed,
                self.players,
                self.starting_board.clone(),
            )),
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn players(&self) -> [PlayerKind; 2] {
        self.players
    }

    pub fn player_kind(&self, player: Player) -> Option<PlayerKind> {
        self.players.get(player_index(player)?).copied()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_campaign(&self) -> bool {
        self.campaign_level.is_some()
    }

    pub fn campaign_level(&self) -> Option<usize> {
        self.campaign_level
    }

    /// Layout the game started from, or `None` for the standard opening
    pub fn starting_layout(&self) -> Option<String> {
        (self.starting_board != Board::initial()).then(|| self.starting_board.to_string())
    }

    pub fn ticks_per_cell(&self) -> u64 {
        self.ticks_per_cell
    }

    pub fn cooldown_ticks(&self) -> u64 {
        self.cooldown_ticks
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ready(&self, player: Player) -> bool {
        player_index(player).is_some_and(|i| self.players_ready[i])
    }

    pub fn active_moves(&self) -> &[Move] {
        &self.active_moves
    }

    pub fn cooldowns(&self) -> &[Cooldown] {
        &self.cooldowns
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// The older of the last tick and the last human move
    ///
    /// A running game ticks constantly, so in practice this is the time of the
    /// last human move; a game nobody started is idle from creation.
    pub fn idle_since(&self) -> Instant {
        self.last_tick_at.min(self.last_move_at)
    }

    /// Whether `piece` is part of an active move
    pub fn is_moving(&self, piece: PieceId) -> bool {
        self.active_moves.iter().any(|m| m.piece == piece)
    }

    /// Whether `piece` is resting after a move
    pub fn on_cooldown(&self, piece: PieceId) -> bool {
        self.cooldowns.iter().any(|c| c.piece == piece)
    }

    /// Uncaptured piece on `square` that is not mid-move
    pub fn stationary_piece_at(&self, square: Square) -> Option<&Piece> {
        self.board
            .pieces
            .iter()
            .find(|p| !p.captured && p.square() == square && !self.is_moving(p.id))
    }

    /// Whether one of `player`'s active moves ends on `square`
    pub(crate) fn own_move_ends_at(&self, player: Player, square: Square) -> bool {
        self.active_moves
            .iter()
            .any(|m| m.player == player && m.destination() == Some(square))
    }

    /// Whether `square` is on the not-yet-travelled part of one of `player`'s moves
    pub(crate) fn crosses_future_path(&self, player: Player, square: Square) -> bool {
        self.active_moves
            .iter()
            .filter(|m| m.player == player)
            .any(|m| {
                let elapsed = self.current_tick - m.starting_tick;
                let travelled = elapsed.div_ceil(self.ticks_per_cell) as usize;
                m.path
                    .iter()
                    .skip(travelled)
                    .any(|w| w.square() == Some(square))
            })
    }

    /// Command `piece_id` to move to `(row, col)` on behalf of `player`
    ///
    /// # Returns
    ///
    /// The registered [`Move`] (the king's, when castling; the rook's move is
    /// registered alongside it), or the reason the command was rejected.
    /// Rejections never change any state.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pawn = game.board().piece_at(Square::new(6, 4)).unwrap().id;
    /// let mv = game.move_piece(pawn, 1, 4, 4)?;
    /// assert_eq!(mv.path.len(), 3);
    /// ```
    pub fn move_piece(
        &mut self,
        piece_id: PieceId,
        player: Player,
        row: i8,
        col: i8,
    ) -> Result<Move, MoveRejection> {
        let result = self.try_move(piece_id, player, Square::new(row, col));
        match &result {
            Ok(mv) => debug!(
                "[ENGINE] tick {}: piece {} moving along {} waypoints",
                self.current_tick,
                mv.piece,
                mv.path.len()
            ),
            Err(reason) => debug!(
                "[ENGINE] tick {}: move of piece {} to ({}, {}) rejected: {}",
                self.current_tick, piece_id, row, col, reason
            ),
        }
        result
    }

    fn try_move(
        &mut self,
        piece_id: PieceId,
        player: Player,
        to: Square,
    ) -> Result<Move, MoveRejection> {
        if self.status.is_finished() {
            return Err(MoveRejection::GameFinished);
        }

        let piece = self
            .board
            .get(piece_id)
            .ok_or(MoveRejection::UnknownPiece { piece: piece_id })?;

        if piece.player != player {
            return Err(MoveRejection::WrongOwner {
                piece: piece_id,
                player,
            });
        }
        if piece.captured {
            return Err(MoveRejection::Captured { piece: piece_id });
        }
        if !to.in_bounds() {
            return Err(MoveRejection::OutOfBounds {
                row: to.row,
                col: to.col,
            });
        }
        if piece.square() == to {
            return Err(MoveRejection::SameSquare);
        }
        if self.is_moving(piece_id) {
            return Err(MoveRejection::AlreadyMoving { piece: piece_id });
        }
        if self.on_cooldown(piece_id) {
            return Err(MoveRejection::OnCooldown { piece: piece_id });
        }

        let validated =
            move_gen::compute_path(self, piece, to).ok_or(MoveRejection::Illegal)?;

        let mut path = Vec::with_capacity(validated.path.len() + 1);
        path.push(Waypoint::Square(piece.square()));
        path.extend(validated.path);

        let mv = Move {
            piece: piece_id,
            player,
            path,
            starting_tick: self.current_tick,
        };
        self.register(mv.clone());

        if let Some(castle) = validated.castle {
            debug!("[ENGINE] castling with piece {}", castle.piece);
            self.register(castle);
        }

        if self.player_kind(player) == Some(PlayerKind::Human) {
            self.last_move_at = Instant::now();
        }

        Ok(mv)
    }

    fn register(&mut self, mv: Move) {
        if let Some(piece) = self.board.get_mut(mv.piece) {
            piece.moved = true;
        }
        self.move_log.push(mv.clone());
        self.active_moves.push(mv);
    }

    /// Mark `player` as ready; the game starts once everyone is
    pub fn mark_ready(&mut self, player: Player) {
        let Some(index) = player_index(player) else {
            return;
        };

        self.players_ready[index] = true;
        if self.players_ready.iter().all(|ready| *ready) && !self.started {
            let now = Instant::now();
            self.started = true;
            self.last_move_at = now;
            self.last_tick_at = now;
            debug!("[ENGINE] all players ready, game started");
        }
    }

    /// Full serializable state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}

fn player_index(player: Player) -> Option<usize> {
    match player {
        PLAYER_ONE => Some(0),
        PLAYER_TWO => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Game {
        Game::new(Speed::Standard, [PlayerKind::Human, PlayerKind::Human])
    }

    fn id_at(game: &Game, row: i8, col: i8) -> PieceId {
        game.board()
            .piece_at(Square::new(row, col))
            .expect("piece on square")
            .id
    }

    #[test]
    fn test_pawn_double_push_waypoints() {
        let mut game = standard();
        let pawn = id_at(&game, 6, 4);

        let mv = game.move_piece(pawn, 1, 4, 4).expect("e2-e4");
        assert_eq!(
            mv.path,
            vec![
                Waypoint::Square(Square::new(6, 4)),
                Waypoint::Square(Square::new(5, 4)),
                Waypoint::Square(Square::new(4, 4)),
            ]
        );
        assert_eq!(mv.starting_tick, 0);
        assert_eq!(game.active_moves().len(), 1);
        assert_eq!(game.move_log().len(), 1);
        assert!(game.board().get(pawn).expect("pawn").moved);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut game = standard();
        let pawn = id_at(&game, 6, 4);
        let black_pawn = id_at(&game, 1, 4);

        assert_eq!(
            game.move_piece(black_pawn, 1, 2, 4),
            Err(MoveRejection::WrongOwner {
                piece: black_pawn,
                player: 1
            })
        );
        assert_eq!(
            game.move_piece(pawn, 1, 8, 4),
            Err(MoveRejection::OutOfBounds { row: 8, col: 4 })
        );
        assert_eq!(game.move_piece(pawn, 1, 6, 4), Err(MoveRejection::SameSquare));
        assert_eq!(game.move_piece(pawn, 1, 3, 4), Err(MoveRejection::Illegal));
        assert_eq!(
            game.move_piece(999, 1, 3, 4),
            Err(MoveRejection::UnknownPiece { piece: 999 })
        );

        assert!(game.active_moves().is_empty());
        assert!(game.move_log().is_empty());
        assert!(!game.board().get(pawn).expect("pawn").moved);
    }

    #[test]
    fn test_busy_piece_is_rejected() {
        let mut game = standard();
        let pawn = id_at(&game, 6, 4);

        game.move_piece(pawn, 1, 5, 4).expect("push");
        assert_eq!(
            game.move_piece(pawn, 1, 4, 4),
            Err(MoveRejection::AlreadyMoving { piece: pawn })
        );

        for _ in 0..game.ticks_per_cell() {
            game.advance();
        }
        assert!(game.on_cooldown(pawn));
        assert_eq!(
            game.move_piece(pawn, 1, 4, 4),
            Err(MoveRejection::OnCooldown { piece: pawn })
        );
    }

    const TWO_ROOKS: &str = "
        00000000K2000000
        0000000000000000
        0000000000000000
        0000000000000000
        0000000000000000
        0000000000000000
        00000000Q1000000
        R1000000K10000R1
    ";

    fn two_rooks() -> Game {
        Game::with_board(
            Speed::Standard,
            [PlayerKind::Human; 2],
            Board::from_layout(TWO_ROOKS).expect("layout"),
        )
    }

    #[test]
    fn test_cannot_step_onto_own_pending_destination() {
        let mut game = two_rooks();
        let rook = id_at(&game, 7, 7);
        let king = id_at(&game, 7, 4);

        game.move_piece(rook, 1, 7, 5).expect("rook along the back rank");
        assert_eq!(
            game.move_piece(king, 1, 7, 5),
            Err(MoveRejection::Illegal),
            "King may not step onto the rook's destination"
        );
        assert_eq!(game.move_piece(king, 1, 6, 5).map(|m| m.piece), Ok(king));
    }

    #[test]
    fn test_destination_on_own_future_path_is_rejected() {
        let mut game = two_rooks();
        let rook = id_at(&game, 7, 0);
        let queen = id_at(&game, 6, 4);

        game.move_piece(rook, 1, 3, 0).expect("rook slides up");
        assert_eq!(
            game.move_piece(queen, 1, 6, 0),
            Err(MoveRejection::Illegal),
            "(6, 0) is still ahead of the rook"
        );
        assert_eq!(game.move_piece(queen, 1, 4, 2).map(|m| m.piece), Ok(queen));
    }

    #[test]
    fn test_travelled_squares_are_free_again() {
        let mut game = two_rooks();
        let rook = id_at(&game, 7, 0);
        let queen = id_at(&game, 6, 4);

        game.move_piece(rook, 1, 3, 0).expect("rook slides up");
        for _ in 0..2 * game.ticks_per_cell() {
            game.advance();
        }
        assert_eq!(
            game.board().get(rook).expect("rook").square(),
            Square::new(5, 0)
        );
        assert_eq!(game.move_piece(queen, 1, 6, 0).map(|m| m.piece), Ok(queen));
    }

    #[test]
    fn test_castling_registers_two_moves() {
        let layout = "
            00000000K2000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            R10000Q1K10000R1
        ";
        let board = Board::from_layout(layout).expect("layout");
        let mut game = Game::with_board(Speed::Standard, [PlayerKind::Human; 2], board);
        let king = id_at(&game, 7, 4);
        let rook = id_at(&game, 7, 7);

        game.move_piece(king, 1, 7, 6).expect("castle king side");
        assert_eq!(game.active_moves().len(), 2);
        assert_eq!(game.move_log().len(), 2);
        assert!(game.is_moving(rook));
        assert!(game.board().get(rook).expect("rook").moved);
    }

    #[test]
    fn test_castling_rejected_after_rook_moved() {
        let layout = "
            00000000K2000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            R10000Q1K10000R1
        ";
        let board = Board::from_layout(layout).expect("layout");
        let mut game = Game::with_board(Speed::Lightning, [PlayerKind::Human; 2], board);
        let king = id_at(&game, 7, 4);
        let rook = id_at(&game, 7, 7);

        game.move_piece(rook, 1, 6, 7).expect("rook up");
        let round_trip = game.ticks_per_cell() + game.cooldown_ticks();
        for _ in 0..round_trip {
            game.advance();
        }
        game.move_piece(rook, 1, 7, 7).expect("rook back home");
        for _ in 0..round_trip {
            game.advance();
        }

        assert_eq!(game.board().get(rook).expect("rook").square(), Square::new(7, 7));
        assert_eq!(game.move_piece(king, 1, 7, 6), Err(MoveRejection::Illegal));
    }

    #[test]
    fn test_mark_ready_starts_game() {
        let mut game = standard();
        assert!(!game.is_started());
        game.mark_ready(1);
        assert!(!game.is_started());
        game.mark_ready(3);
        assert!(!game.is_started(), "Unknown players are ignored");
        game.mark_ready(2);
        assert!(game.is_started());
        assert!(game.is_ready(1) && game.is_ready(2));
    }

    #[test]
    fn test_campaign_game_uses_level_board() {
        let game = Game::for_campaign(1, [PlayerKind::Human, PlayerKind::Bot]).expect("level 1");
        assert!(game.is_campaign());
        assert_eq!(game.board().pieces().len(), 5);
        assert!(Game::for_campaign(99, [PlayerKind::Human; 2]).is_err());

        let restarted = game.restart().expect("restart");
        assert_eq!(restarted.campaign_level(), Some(1));
    }

    #[test]
    fn test_starting_layout_survives_play() {
        assert_eq!(standard().starting_layout(), None, "Standard opening needs no layout");

        let mut game = two_rooks();
        let layout = game.starting_layout().expect("custom board");
        let rook = game.board().piece_at(Square::new(7, 0)).expect("rook").id;
        game.move_piece(rook, 1, 4, 0).expect("rook up");
        for _ in 0..40 {
            game.advance();
        }

        assert_eq!(game.starting_layout(), Some(layout.clone()), "Only the live board changes");
        let restarted = game.restart().expect("restart");
        assert_eq!(restarted.board(), &Board::from_layout(&layout).expect("layout parses"));
    }
}
