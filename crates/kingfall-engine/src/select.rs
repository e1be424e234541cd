//! One-ply move selection for the computer side.
//!
//! Every pseudo-legal move is played on a scratch board, the resulting
//! position is scored with [`evaluate`] plus a few move bonuses and a small
//! random jitter, and the move is taken back. The first move with the highest
//! score wins.
//!
//! The heuristics are written from Black's viewpoint: [`evaluate`] is always
//! Black-positive and the pawn bonus rewards moving toward row 7. Driving
//! White with this selector reuses that viewpoint unchanged.

use crate::{all_moves, evaluate, Board};
use kingfall_core::{Color, Move, PieceKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected selector settings.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SelectorConfigError {
    #[error("jitter must be a finite, non-negative number, got {0}")]
    InvalidJitter(f64),
}

/// Weights for the move-selection heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Multiplier applied to the value of a captured piece.
    pub capture_multiplier: i32,
    /// Bonus per row of distance between a pawn's destination and row 7.
    pub pawn_advance_weight: i32,
    /// Bonus for landing in the central 4×4 block.
    pub center_bonus: i32,
    /// Half-width of the uniform jitter added to every score. Zero disables it.
    pub jitter: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            capture_multiplier: 2,
            pawn_advance_weight: 2,
            center_bonus: 5,
            jitter: 5.0,
        }
    }
}

impl SelectorConfig {
    /// The default weights with jitter disabled.
    pub fn deterministic() -> Self {
        SelectorConfig {
            jitter: 0.0,
            ..Self::default()
        }
    }

    /// Checks that the settings can be used for move selection.
    ///
    /// The jitter range `[-jitter, jitter]` must have a finite width.
    pub fn validate(&self) -> Result<(), SelectorConfigError> {
        let jitter = self.jitter;
        if jitter >= 0.0 && (2.0 * jitter).is_finite() {
            Ok(())
        } else {
            Err(SelectorConfigError::InvalidJitter(jitter))
        }
    }
}

/// Picks moves by scoring every candidate one ply deep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveSelector {
    config: SelectorConfig,
}

impl MoveSelector {
    /// Creates a selector. `config` should pass [`SelectorConfig::validate`];
    /// a jitter without a finite range panics on the first draw.
    pub fn new(config: SelectorConfig) -> Self {
        MoveSelector { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Chooses a move for `color`, or `None` if it has no moves.
    ///
    /// The board is not modified; candidates are played on a scratch copy.
    pub fn select_move<R: Rng>(&self, board: &Board, color: Color, rng: &mut R) -> Option<Move> {
        let moves = all_moves(board, color);
        let mut scratch = board.clone();
        let mut best: Option<(Move, f64)> = None;

        for &mv in &moves {
            let score = f64::from(self.heuristic_score(&mut scratch, mv)) + self.jitter(rng);
            tracing::trace!(%mv, score, "scored candidate");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        match best {
            Some((mv, score)) => {
                tracing::debug!(%color, candidates = moves.len(), %mv, score, "selected move");
                Some(mv)
            }
            None => {
                tracing::debug!(%color, "no moves available");
                None
            }
        }
    }

    /// Scores a single move without jitter.
    ///
    /// The move is simulated on `board` and taken back before returning, so
    /// the board is unchanged afterwards.
    pub fn heuristic_score(&self, board: &mut Board, mv: Move) -> i32 {
        let undo = board.simulate(mv);
        let mut score = evaluate(board);
        board.undo(undo);

        if let Some(captured) = undo.captured() {
            score += captured.kind.value() * self.config.capture_multiplier;
        }
        if undo.moved().kind == PieceKind::Pawn {
            score += (7 - i32::from(mv.to().row())) * self.config.pawn_advance_weight;
        }
        if mv.to().is_central() {
            score += self.config.center_bonus;
        }
        score
    }

    fn jitter<R: Rng>(&self, rng: &mut R) -> f64 {
        let width = self.config.jitter;
        if width > 0.0 {
            rng.gen_range(-width..=width)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingfall_core::Square;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
        Move::new(Square::at(from.0, from.1), Square::at(to.0, to.1))
    }

    fn deterministic() -> MoveSelector {
        MoveSelector::new(SelectorConfig::deterministic())
    }

    #[test]
    fn no_moves_returns_none() {
        let board = Board::from_placement("8/8/8/8/8/8/8/4K3").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            MoveSelector::default().select_move(&board, Color::Black, &mut rng),
            None
        );
    }

    #[test]
    fn selection_leaves_board_untouched() {
        let board = Board::initial();
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(7);
        MoveSelector::default().select_move(&board, Color::Black, &mut rng);
        assert_eq!(board, before);
    }

    #[test]
    fn heuristic_capture_bonus() {
        // Black rook a8 can take the white queen on a1.
        let mut board = Board::from_placement("r7/8/8/8/8/8/8/Q7").unwrap();
        let score = deterministic().heuristic_score(&mut board, mv((0, 0), (7, 0)));
        // After the capture only the black rook remains, plus twice the queen's value.
        assert_eq!(score, 50 + 2 * 90);
        assert_eq!(board.to_placement(), "r7/8/8/8/8/8/8/Q7");
    }

    #[test]
    fn heuristic_pawn_and_center_bonus() {
        let mut board = Board::initial();
        let selector = deterministic();
        // e7-e5 lands on row 3, inside the center.
        assert_eq!(
            selector.heuristic_score(&mut board, mv((1, 4), (3, 4))),
            (7 - 3) * 2 + 5
        );
        // a7-a6 is neither central nor far advanced.
        assert_eq!(
            selector.heuristic_score(&mut board, mv((1, 0), (2, 0))),
            (7 - 2) * 2
        );
        // Knight b8-c6 is central but earns no pawn bonus.
        assert_eq!(selector.heuristic_score(&mut board, mv((0, 1), (2, 2))), 5);
    }

    #[test]
    fn deterministic_opening_choice() {
        let board = Board::initial();
        let mut rng = StdRng::seed_from_u64(0);
        let choice = deterministic().select_move(&board, Color::Black, &mut rng);
        // c7-c6 scores 10 + 5 = 15 and is generated before d7-d6, which ties.
        assert_eq!(choice, Some(mv((1, 2), (2, 2))));
    }

    #[test]
    fn ties_keep_first_move() {
        // Two black rooks with symmetric quiet moves; every candidate scores
        // the same material, so the first generated move must win.
        let board = Board::from_placement("r6r/8/8/8/8/8/8/8").unwrap();
        let selector = MoveSelector::new(SelectorConfig {
            center_bonus: 0,
            ..SelectorConfig::deterministic()
        });
        let mut rng = StdRng::seed_from_u64(0);
        let first = all_moves(&board, Color::Black)[0];
        assert_eq!(selector.select_move(&board, Color::Black, &mut rng), Some(first));
    }

    #[test]
    fn deterministic_without_jitter() {
        let board = Board::from_placement("rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R")
            .unwrap();
        let selector = deterministic();
        let a = selector.select_move(&board, Color::Black, &mut StdRng::seed_from_u64(1));
        let b = selector.select_move(&board, Color::Black, &mut StdRng::seed_from_u64(99));
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let board = Board::initial();
        let selector = MoveSelector::default();
        let a = selector.select_move(&board, Color::Black, &mut StdRng::seed_from_u64(42));
        let b = selector.select_move(&board, Color::Black, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn selected_move_is_generated() {
        let board = Board::initial();
        let moves = all_moves(&board, Color::Black);
        let selector = MoveSelector::default();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = selector.select_move(&board, Color::Black, &mut rng).unwrap();
            assert!(moves.contains(choice));
        }
    }

    #[test]
    fn prefers_capturing_the_king() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4Q3").unwrap();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = MoveSelector::default().select_move(&board, Color::White, &mut rng);
            assert_eq!(choice, Some(mv((7, 4), (0, 4))));
        }
    }

    #[test]
    fn validate_jitter() {
        assert_eq!(SelectorConfig::default().validate(), Ok(()));
        assert_eq!(SelectorConfig::deterministic().validate(), Ok(()));

        for jitter in [-1.0, f64::INFINITY, f64::NEG_INFINITY, 1e308, f64::MAX] {
            let config = SelectorConfig {
                jitter,
                ..SelectorConfig::default()
            };
            assert_eq!(config.validate(), Err(SelectorConfigError::InvalidJitter(jitter)));
        }

        let nan = SelectorConfig {
            jitter: f64::NAN,
            ..SelectorConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn validated_jitter_draws_without_panicking() {
        let config = SelectorConfig {
            jitter: 1e307,
            ..SelectorConfig::default()
        };
        config.validate().unwrap();
        let selector = MoveSelector::new(config);
        let mut rng = StdRng::seed_from_u64(1);
        let choice = selector.select_move(&Board::initial(), Color::Black, &mut rng);
        assert!(choice.is_some());
    }

    #[test]
    fn config_from_toml_defaults_missing_fields() {
        let config: SelectorConfig = toml::from_str("jitter = 0.0\ncenter_bonus = 8").unwrap();
        assert_eq!(config.jitter, 0.0);
        assert_eq!(config.center_bonus, 8);
        assert_eq!(config.capture_multiplier, 2);
        assert_eq!(config.pawn_advance_weight, 2);
    }
}
