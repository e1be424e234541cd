//! Move application and two-square undo.
//!
//! [`Board::make_move`] is the real move: it relocates the piece and promotes
//! pawns that reach the far row. [`Board::simulate`] is the scratch move used
//! while scoring candidates: it relocates the piece without promotion and
//! returns an [`Undo`] that restores exactly the two touched squares.

use crate::Board;
use kingfall_core::{Color, Move, Piece, PieceKind, Square};

/// Board-level effect of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    /// The piece that moved, as it was before any promotion.
    pub piece: Piece,
    /// The piece that stood on the destination, if any.
    pub captured: Option<Piece>,
    /// True if the moving pawn was replaced by a queen.
    pub promoted: bool,
}

/// Result of applying a move to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    /// The piece that moved, as it was before any promotion.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// Game-over flag after the move.
    pub game_over: bool,
    /// Winner after the move, set once a king has been captured.
    pub winner: Option<Color>,
}

impl AppliedMove {
    /// Returns the side that made the move.
    #[inline]
    pub fn mover(&self) -> Color {
        self.piece.color
    }
}

/// Prior contents of the two squares touched by a simulated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a simulated move must be undone"]
pub struct Undo {
    from: Square,
    to: Square,
    moved: Piece,
    captured: Option<Piece>,
}

impl Undo {
    /// The piece that was relocated.
    #[inline]
    pub fn moved(&self) -> Piece {
        self.moved
    }

    /// The piece that was on the destination before the move.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl Board {
    /// Plays a move on the board, promoting pawns that reach the far row.
    ///
    /// # Panics
    /// Panics if the source square is empty. Callers must only pass moves
    /// produced by the move generator.
    pub fn make_move(&mut self, mv: Move) -> MoveEffect {
        let Undo {
            moved, captured, ..
        } = self.simulate(mv);

        let promoted =
            moved.kind == PieceKind::Pawn && mv.to().row() == moved.color.promotion_row();
        if promoted {
            self.set(mv.to(), Some(Piece::new(PieceKind::Queen, moved.color)));
        }

        MoveEffect {
            piece: moved,
            captured,
            promoted,
        }
    }

    /// Relocates the piece for a move without promotion.
    ///
    /// # Panics
    /// Panics if the source square is empty.
    pub fn simulate(&mut self, mv: Move) -> Undo {
        let moved = match self.get(mv.from()) {
            Some(piece) => piece,
            None => panic!("no piece on {} for move {}", mv.from(), mv),
        };
        let captured = self.get(mv.to());

        self.set(mv.to(), Some(moved));
        self.set(mv.from(), None);

        Undo {
            from: mv.from(),
            to: mv.to(),
            moved,
            captured,
        }
    }

    /// Restores the two squares touched by [`simulate`](Board::simulate).
    pub fn undo(&mut self, undo: Undo) {
        self.set(undo.from, Some(undo.moved));
        self.set(undo.to, undo.captured);
    }
}
