//! Rules engine and move selector for kingfall.
//!
//! This crate provides:
//! - [`Board`] - the 8×8 grid of optional pieces
//! - [`pseudo_legal_moves`] and [`all_moves`] - per-piece move generation
//! - [`Board::make_move`], [`Board::simulate`], [`Board::undo`] - move application
//! - [`evaluate`] - static material scoring from Black's viewpoint
//! - [`MoveSelector`] - one-ply move choice for the computer side
//! - [`GameState`] - a full session with turns, captures, and outcome
//!
//! # Rules
//!
//! Pieces move as in chess, without castling or en passant. Pawns promote to
//! a queen automatically. Moves are never filtered for leaving a king
//! attacked: the game ends when a king is actually captured.
//!
//! # Example
//!
//! ```
//! use kingfall_core::Square;
//! use kingfall_engine::GameState;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut game = GameState::new();
//! let targets = game.select_square(Square::at(6, 4));
//! assert_eq!(targets.len(), 2);
//!
//! game.play_move(Square::at(6, 4), Square::at(4, 4)).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let reply = game.computer_move(&mut rng).unwrap();
//! assert!(reply.is_some());
//! ```

mod apply;
mod board;
mod eval;
mod game;
pub mod movegen;
mod select;

pub use apply::{AppliedMove, MoveEffect, Undo};
pub use board::Board;
pub use eval::{evaluate, EVAL_PERSPECTIVE};
pub use game::{ClickOutcome, GameError, GameState, Selection, COMPUTER, HUMAN};
pub use movegen::{all_moves, pseudo_legal_moves, MoveList};
pub use select::{MoveSelector, SelectorConfig, SelectorConfigError};

/// Starts a new game in the standard position.
pub fn new_game() -> GameState {
    GameState::new()
}
