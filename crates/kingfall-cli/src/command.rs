//! Parsing of the commands typed at the prompt.

use kingfall_core::Square;
use thiserror::Error;

/// Errors from parsing a prompt line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid square '{0}' (expected a1-h8)")]
    InvalidSquare(String),
    #[error("'{0}' expects a square")]
    MissingSquare(&'static str),
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
}

/// Commands accepted at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a move from one square to another.
    Move { from: Square, to: Square },
    /// Show the destinations of a square.
    Select(Square),
    /// Click a square (select, move, or deselect).
    Click(Square),
    /// Redraw the board.
    Board,
    /// Start a new game.
    New,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parses one line of input.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let Some(cmd) = parts.next() else {
            return Ok(Command::Empty);
        };

        match cmd.to_ascii_lowercase().as_str() {
            "board" | "b" => Ok(Command::Board),
            "new" | "reset" => Ok(Command::New),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "sel" | "select" => Ok(Command::Select(Self::square_arg(parts.next(), "sel")?)),
            "click" => Ok(Command::Click(Self::square_arg(parts.next(), "click")?)),
            _ => Self::parse_move(cmd, parts.next()),
        }
    }

    fn parse_move(first: &str, second: Option<&str>) -> Result<Self, CommandError> {
        match second {
            Some(to) => Ok(Command::Move {
                from: Self::square(first)?,
                to: Self::square(to)?,
            }),
            None if first.len() == 4 && first.is_ascii() => Ok(Command::Move {
                from: Self::square(&first[..2])?,
                to: Self::square(&first[2..])?,
            }),
            None => Err(CommandError::Unknown(first.to_string())),
        }
    }

    fn square_arg(arg: Option<&str>, cmd: &'static str) -> Result<Square, CommandError> {
        arg.ok_or(CommandError::MissingSquare(cmd))
            .and_then(Self::square)
    }

    fn square(text: &str) -> Result<Square, CommandError> {
        Square::from_algebraic(text).ok_or_else(|| CommandError::InvalidSquare(text.to_string()))
    }
}
