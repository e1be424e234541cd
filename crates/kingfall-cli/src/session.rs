//! Interactive session: applies prompt commands to a game and prints the results.

use crate::command::Command;
use crate::render;
use kingfall_core::Square;
use kingfall_engine::{AppliedMove, ClickOutcome, GameState, SelectorConfig};
use rand::Rng;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const HELP: &str = "\
Commands:
  e2 e4 | e2e4   move a piece
  sel <square>   show where a piece can go
  click <square> select a piece, then click a destination
  board          redraw the board
  new            start a new game
  help           show this message
  quit           leave";

/// Whether the prompt loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game played against the computer at the terminal.
pub struct Session<R: Rng> {
    game: GameState,
    rng: R,
    think_delay: Duration,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SelectorConfig, rng: R, think_delay: Duration) -> Self {
        Session {
            game: GameState::with_selector(config),
            rng,
            think_delay,
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Writes the greeting and the starting board.
    pub fn start(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "kingfall: you play White (uppercase). Type 'help' for commands.")?;
        self.show(out)
    }

    /// Executes one command.
    pub fn handle(&mut self, cmd: Command, out: &mut impl Write) -> io::Result<Flow> {
        match cmd {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Board => self.show(out)?,
            Command::New => {
                self.game.reset();
                writeln!(out, "New game.")?;
                self.show(out)?;
            }
            Command::Select(square) => self.select(square, out)?,
            Command::Move { from, to } => match self.game.play_move(from, to) {
                Ok(applied) => self.after_human_move(&applied, out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Click(square) => match self.game.click(square) {
                ClickOutcome::Ignored => writeln!(out, "Nothing to select on {}.", square)?,
                ClickOutcome::Selected(selection) => {
                    writeln!(out, "{}", render::targets(selection.square, &selection.targets))?;
                    write!(out, "{}", render::board(&self.game))?;
                }
                ClickOutcome::Deselected => writeln!(out, "Selection cleared.")?,
                ClickOutcome::Moved(applied) => self.after_human_move(&applied, out)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn select(&mut self, square: Square, out: &mut impl Write) -> io::Result<()> {
        if self.game.is_game_over() {
            return writeln!(out, "The game is over. Type 'new' to play again.");
        }
        let targets = self.game.select_square(square);
        if self.game.selection().is_none() {
            return writeln!(out, "No piece of yours on {}.", square);
        }
        writeln!(out, "{}", render::targets(square, &targets))?;
        write!(out, "{}", render::board(&self.game))
    }

    fn after_human_move(&mut self, applied: &AppliedMove, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render::applied(applied))?;
        if !applied.game_over {
            self.reply(out)?;
        }
        self.show(out)
    }

    fn reply(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Computer is thinking...")?;
        out.flush()?;
        if !self.think_delay.is_zero() {
            thread::sleep(self.think_delay);
        }

        match self.game.computer_move(&mut self.rng) {
            Ok(Some(applied)) => writeln!(out, "{}", render::applied(&applied)),
            Ok(None) => writeln!(out, "The computer has no moves."),
            Err(e) => {
                tracing::warn!(error = %e, "computer move refused");
                writeln!(out, "{}", e)
            }
        }
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", render::board(&self.game))?;
        write!(out, "{}", render::status(&self.game))
    }
}
