//! Board representation.

use kingfall_core::{in_bounds, Color, Piece, PieceKind, Placement, PlacementError, Square};
use std::fmt;

/// An 8×8 grid of optional pieces.
///
/// The board performs no legality checks of its own: it stores whatever it
/// is told to store. Move generation and move application are responsible
/// for keeping the contents meaningful.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Back row layout from column 0 to column 7.
    const BACK_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting layout.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in Self::BACK_ROW.iter().enumerate() {
                board.set(
                    Square::at(color.back_row(), col as u8),
                    Some(Piece::new(*kind, color)),
                );
                board.set(
                    Square::at(color.pawn_row(), col as u8),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        board
    }

    /// Creates a board from placement text (see [`Placement`]).
    pub fn from_placement(text: &str) -> Result<Self, PlacementError> {
        let placement = Placement::parse(text)?;
        let mut board = Board::empty();
        for (sq, piece) in placement.pieces {
            board.set(sq, Some(piece));
        }
        Ok(board)
    }

    /// Returns the board as placement text.
    pub fn to_placement(&self) -> String {
        Placement::render(|sq| self.get(sq))
    }

    /// Returns true if (row, col) lies on the board.
    #[inline]
    pub const fn in_bounds(row: i8, col: i8) -> bool {
        in_bounds(row, col)
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Replaces the contents of the given square.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Returns the piece at (row, col).
    ///
    /// # Panics
    /// Panics if the coordinates are off the board.
    #[inline]
    pub fn at(&self, row: u8, col: u8) -> Option<Piece> {
        self.get(Square::at(row, col))
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares occupied by `color`, in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the number of occupied squares.
    pub fn count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    /// Returns the square of `color`'s king, if it is still on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::ops::Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.index() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

/// Renders a labelled diagram with row 0 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = match self.at(row, col) {
                    Some(piece) => piece.to_char(),
                    None if (row + col) % 2 == 0 => '.',
                    None => ':',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
