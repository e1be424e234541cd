//! Board square representation.

use std::fmt;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// Returns true if the signed coordinates lie on the 8×8 board.
#[inline]
pub const fn in_bounds(row: i8, col: i8) -> bool {
    row >= 0 && row < BOARD_SIZE as i8 && col >= 0 && col < BOARD_SIZE as i8
}

/// A square on the board, addressed by (row, col).
///
/// Row 0 is Black's back row and row 7 is White's. Column 0 is the a-file,
/// so row 7 column 4 is "e1" and row 0 column 4 is "e8".
///
/// Internally packed as `row * 8 + col`, which makes the derived ordering
/// row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, or `None` if off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square(row * BOARD_SIZE + col))
        } else {
            None
        }
    }

    /// Creates a square from row and column.
    ///
    /// # Panics
    /// Panics if either coordinate is outside 0-7.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "square out of bounds");
        Square(row * BOARD_SIZE + col)
    }

    /// Returns the row-major index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Returns the square shifted by (dr, dc), or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if in_bounds(row, col) {
            Some(Square(row as u8 * BOARD_SIZE + col as u8))
        } else {
            None
        }
    }

    /// Returns true if the square lies in the central 4×4 block (rows and cols 2-5).
    #[inline]
    pub const fn is_central(self) -> bool {
        let (row, col) = (self.row(), self.col());
        row >= 2 && row <= 5 && col >= 2 && col <= 5
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Square)
    }

    /// Parses a square from algebraic coordinates (e.g., "e2" is row 6, col 4).
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::new(b'8' - rank, file - b'a')
    }

    /// Returns the algebraic coordinates for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.row(), self.col())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
