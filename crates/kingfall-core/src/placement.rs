//! Piece placement text, the board field of FEN.
//!
//! Rows are listed from row 0 (Black's back row) to row 7, separated by `/`.
//! Within a row, letters name pieces (uppercase for White) and digits count
//! consecutive empty squares.

use crate::{Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing placement text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("invalid placement: expected 8 rows, got {0}")]
    InvalidRowCount(usize),

    #[error("invalid character '{character}' in row {row}")]
    InvalidCharacter { row: usize, character: char },

    #[error("row {row} has {squares} squares, expected 8")]
    InvalidRowLength { row: usize, squares: u32 },
}

/// Parsed placement: every occupied square with its piece, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    pub pieces: Vec<(Square, Piece)>,
}

impl Placement {
    /// The standard starting layout.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses placement text.
    pub fn parse(text: &str) -> Result<Self, PlacementError> {
        let rows: Vec<&str> = text.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(PlacementError::InvalidRowCount(rows.len()));
        }

        let mut pieces = Vec::new();
        for (row, row_text) in rows.iter().enumerate() {
            let mut squares = 0u32;
            let mut after_digit = false;
            for c in row_text.chars() {
                match (c.to_digit(10), Piece::from_char(c)) {
                    // A run of empty squares is a single digit 1-8.
                    (Some(skip @ 1..=8), _) if !after_digit => {
                        squares += skip;
                        after_digit = true;
                    }
                    (None, Some(piece)) => {
                        if squares < 8 {
                            pieces.push((Square::at(row as u8, squares as u8), piece));
                        }
                        squares += 1;
                        after_digit = false;
                    }
                    _ => return Err(PlacementError::InvalidCharacter { row, character: c }),
                }
            }
            if squares != 8 {
                return Err(PlacementError::InvalidRowLength { row, squares });
            }
        }

        Ok(Placement { pieces })
    }

    /// Renders placement text from a square lookup.
    pub fn render(lookup: impl Fn(Square) -> Option<Piece>) -> String {
        let mut out = String::new();
        for row in 0..8u8 {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for col in 0..8u8 {
                match lookup(Square::at(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }
}
