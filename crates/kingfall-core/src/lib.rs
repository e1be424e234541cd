//! Core types for kingfall.
//!
//! This crate provides the fundamental types shared by the engine and its
//! front ends:
//! - [`Piece`], [`PieceKind`], and [`Color`] for piece representation
//! - [`Square`] for (row, col) board coordinates
//! - [`Move`] for move representation
//! - [`Placement`] for textual board layouts

mod color;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::Color;
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use placement::{Placement, PlacementError};
pub use square::{in_bounds, Square, BOARD_SIZE};
