//! Interactive terminal game
//!
//! Reads one command per line:
//!
//! ```text
//! T <n>              advance n ticks
//! M r1 c1 r2 c2      move the piece on (r1, c1) to (r2, c2)
//! Q                  quit
//! ```
//!
//! The board is printed after every command. Without a bot, either side's
//! pieces can be moved; with one, the human plays white.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use kfchess_engine::constants::{PLAYER_ONE, PLAYER_TWO};
use kfchess_engine::{Bot, BotDraws, Difficulty, Game, GameStatus, PlayerKind, Square};

use crate::cli::PlayArgs;

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let (game, bot) = match args.level {
        Some(level) => (
            Game::for_campaign(level, [PlayerKind::Human, PlayerKind::Bot])
                .with_context(|| format!("loading campaign level {}", level))?,
            Some(Bot::new(Difficulty::Campaign)),
        ),
        None => {
            let black = if args.bot.is_some() {
                PlayerKind::Bot
            } else {
                PlayerKind::Human
            };
            (
                Game::new(args.speed, [PlayerKind::Human, black]),
                args.bot.map(Bot::new),
            )
        }
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut terminal = Terminal::new(game, bot, rng);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    terminal.drive(stdin.lock(), &mut stdout)?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Tick(u64),
    Move { from: Square, to: Square },
    Quit,
}

fn parse(line: &str) -> anyhow::Result<Input> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        bail!("empty command");
    };
    let numbers = words
        .map(|w| w.parse::<i64>().with_context(|| format!("not a number: {}", w)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match (command.to_ascii_uppercase().as_str(), numbers.as_slice()) {
        ("T", [n]) if *n >= 0 => Ok(Input::Tick(*n as u64)),
        ("M", [r1, c1, r2, c2]) => Ok(Input::Move {
            from: square(*r1, *c1)?,
            to: square(*r2, *c2)?,
        }),
        ("Q", []) => Ok(Input::Quit),
        _ => bail!("expected `T <n>`, `M r1 c1 r2 c2` or `Q`"),
    }
}

fn square(row: i64, col: i64) -> anyhow::Result<Square> {
    let square = Square::new(i8::try_from(row)?, i8::try_from(col)?);
    if !square.in_bounds() {
        bail!("({}, {}) is off the board", row, col);
    }
    Ok(square)
}

struct Terminal<R: Rng> {
    game: Game,
    bot: Option<Bot>,
    rng: R,
}

impl<R: Rng> Terminal<R> {
    fn new(mut game: Game, bot: Option<Bot>, rng: R) -> Self {
        game.mark_ready(PLAYER_ONE);
        game.mark_ready(PLAYER_TWO);
        Terminal { game, bot, rng }
    }

    /// One tick, with the bot (if any) moving first
    fn tick(&mut self) -> GameStatus {
        if let Some(bot) = self.bot {
            let draws = BotDraws::from_rng(&mut self.rng);
            if let Some(choice) = bot.select_move(&self.game, PLAYER_TWO, draws) {
                if let Err(reason) =
                    self.game
                        .move_piece(choice.piece, PLAYER_TWO, choice.row, choice.col)
                {
                    debug!("[PLAY] bot move refused: {}", reason);
                }
            }
        }
        self.game.advance().0
    }

    fn apply<O: Write>(&mut self, input: Input, out: &mut O) -> io::Result<bool> {
        match input {
            Input::Tick(n) => {
                for _ in 0..n {
                    if self.tick().is_finished() {
                        break;
                    }
                }
            }
            Input::Move { from, to } => {
                let Some(piece) = self.game.board().piece_at(from) else {
                    writeln!(out, "No piece at {}", from)?;
                    return Ok(true);
                };
                let (id, owner) = (piece.id, piece.player);
                let player = if self.bot.is_some() { PLAYER_ONE } else { owner };
                if let Err(reason) = self.game.move_piece(id, player, to.row, to.col) {
                    writeln!(out, "Invalid move: {}", reason)?;
                }
            }
            Input::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn print_board<O: Write>(&self, out: &mut O) -> io::Result<()> {
        writeln!(out, "tick {}", self.game.current_tick())?;
        writeln!(out, "{}", self.game.board())
    }

    fn drive<I: BufRead, O: Write>(&mut self, input: I, out: &mut O) -> anyhow::Result<GameStatus> {
        self.print_board(out)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let keep_going = match parse(&line) {
                Ok(command) => self.apply(command, out)?,
                Err(e) => {
                    writeln!(out, "Error: {}", e)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
            self.print_board(out)?;
            if self.game.status().is_finished() {
                break;
            }
        }

        let status = self.game.status();
        match status {
            GameStatus::Winner(PLAYER_ONE) => writeln!(out, "White wins!")?,
            GameStatus::Winner(_) => writeln!(out, "Black wins!")?,
            GameStatus::Draw => writeln!(out, "Draw!")?,
            GameStatus::Continues => {
                writeln!(out, "Game left at tick {}", self.game.current_tick())?
            }
        }
        Ok(status)
    }
}
