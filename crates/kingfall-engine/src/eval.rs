//! Static material evaluation.

use crate::Board;
use kingfall_core::Color;

/// The side whose viewpoint [`evaluate`] scores from.
pub const EVAL_PERSPECTIVE: Color = Color::Black;

/// Scores the board by material balance.
///
/// The score is always from Black's fixed perspective, never the side to
/// move: Black's material counts positive and White's counts negative.
pub fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece.kind.value();
            if piece.color == EVAL_PERSPECTIVE {
                value
            } else {
                -value
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_is_balanced() {
        assert_eq!(evaluate(&Board::initial()), 0);
    }

    #[test]
    fn empty_board_is_zero() {
        assert_eq!(evaluate(&Board::empty()), 0);
    }

    #[test]
    fn black_material_counts_positive() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/3QK3").unwrap();
        assert_eq!(evaluate(&board), 900 - 900 - 90);

        let board = Board::from_placement("r3k3/pp6/8/8/8/8/8/4K2N").unwrap();
        assert_eq!(evaluate(&board), 50 + 900 + 20 - 900 - 30);
    }

    #[test]
    fn missing_king_swings_score() {
        let board = Board::from_placement("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(evaluate(&board), -900);
    }
}
