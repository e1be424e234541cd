//! Game session: the board plus turn, captures, and outcome.
//!
//! [`GameState`] is the single mutable value a front end drives. The human
//! plays [`HUMAN`] (White) and the computer plays [`COMPUTER`] (Black). A game
//! ends only when a king is captured: there is no check, checkmate, or
//! stalemate detection, and a side without moves simply cannot move.

use crate::{all_moves, pseudo_legal_moves, AppliedMove, Board, MoveSelector, SelectorConfig};
use kingfall_core::{Color, Move, Piece, PieceKind, Square};
use rand::Rng;
use thiserror::Error;

/// The side controlled by the human player.
pub const HUMAN: Color = Color::White;

/// The side controlled by the move selector.
pub const COMPUTER: Color = Color::Black;

/// Reasons a move request is refused.
///
/// A refused request leaves the game unchanged apart from clearing any
/// pending selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game has already ended")]
    GameOver,
    #[error("it is not this side's turn")]
    NotYourTurn,
    #[error("the computer is still thinking")]
    Busy,
    #[error("no piece of the side to move on {0}")]
    NotOwnPiece(Square),
    #[error("illegal move: {0}")]
    IllegalMove(Move),
}

/// A selected square and its destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub square: Square,
    pub targets: Vec<Square>,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing happened: the game is over, the computer is thinking, it is
    /// not the human's turn, or the square held no human piece.
    Ignored,
    /// A human piece was selected.
    Selected(Selection),
    /// The previous selection was dropped without moving.
    Deselected,
    /// The selected piece moved to the clicked square.
    Moved(AppliedMove),
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Color,
    winner: Option<Color>,
    /// Pieces captured by each side, indexed by [`Color::index`].
    captured: [Vec<Piece>; 2],
    selection: Option<Selection>,
    thinking: bool,
    selector: MoveSelector,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game in the starting position with default selector weights.
    pub fn new() -> Self {
        Self::with_selector(SelectorConfig::default())
    }

    /// Creates a new game in the starting position.
    pub fn with_selector(config: SelectorConfig) -> Self {
        Self::from_board(Board::initial(), HUMAN, config)
    }

    /// Creates a game from an arbitrary board and side to move.
    pub fn from_board(board: Board, turn: Color, config: SelectorConfig) -> Self {
        GameState {
            board,
            turn,
            winner: None,
            captured: [Vec::new(), Vec::new()],
            selection: None,
            thinking: false,
            selector: MoveSelector::new(config),
        }
    }

    /// Reinitializes the game in place. Selector weights are kept.
    pub fn reset(&mut self) {
        *self = Self::from_board(Board::initial(), HUMAN, *self.selector.config());
        tracing::info!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Returns the pieces `color` has captured, oldest first.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Returns true while a computer turn is in progress.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn selector(&self) -> &MoveSelector {
        &self.selector
    }

    /// Selects a square for the side to move and returns its destinations.
    ///
    /// Returns an empty list (and clears the selection) if the square is
    /// empty, holds an opponent's piece, or the game is not accepting input.
    pub fn select_square(&mut self, square: Square) -> Vec<Square> {
        self.selection = None;
        if self.check_accepting(self.turn).is_err() || !self.owns(square) {
            return Vec::new();
        }
        let targets = pseudo_legal_moves(&self.board, square);
        self.selection = Some(Selection {
            square,
            targets: targets.clone(),
        });
        targets
    }

    /// Plays a human move after checking it against the generated destinations.
    pub fn play_move(&mut self, from: Square, to: Square) -> Result<AppliedMove, GameError> {
        self.selection = None;
        self.check_accepting(HUMAN)?;
        if !self.owns(from) {
            return Err(GameError::NotOwnPiece(from));
        }
        let mv = Move::new(from, to);
        if !pseudo_legal_moves(&self.board, from).contains(&to) {
            return Err(GameError::IllegalMove(mv));
        }

        let applied = self.apply_move(mv);
        self.turn = self.turn.opposite();
        Ok(applied)
    }

    /// Handles a click on `square` using select-then-move semantics.
    ///
    /// With no selection, clicking a human piece selects it. With a
    /// selection, clicking one of its destinations plays the move and
    /// clicking anywhere else drops the selection.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.check_accepting(HUMAN).is_err() {
            return ClickOutcome::Ignored;
        }

        match self.selection.take() {
            Some(selection) if selection.targets.contains(&square) => {
                match self.play_move(selection.square, square) {
                    Ok(applied) => ClickOutcome::Moved(applied),
                    Err(_) => ClickOutcome::Deselected,
                }
            }
            Some(_) => ClickOutcome::Deselected,
            None if self.owns(square) => {
                self.select_square(square);
                match &self.selection {
                    Some(selection) => ClickOutcome::Selected(selection.clone()),
                    None => ClickOutcome::Ignored,
                }
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Lets the computer pick and play its move.
    ///
    /// Returns `Ok(None)` if the computer has no moves; the turn then stays
    /// with the computer.
    pub fn computer_move<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<AppliedMove>, GameError> {
        let board = self.begin_computer_turn()?;
        let choice = self.selector.select_move(&board, COMPUTER, rng);
        self.finish_computer_turn(choice)
    }

    /// Starts a computer turn and returns a snapshot of the board to search.
    ///
    /// Until [`finish_computer_turn`](Self::finish_computer_turn) is called,
    /// every other request is refused with [`GameError::Busy`].
    pub fn begin_computer_turn(&mut self) -> Result<Board, GameError> {
        self.selection = None;
        self.check_accepting(COMPUTER)?;
        self.thinking = true;
        Ok(self.board.clone())
    }

    /// Completes a computer turn started by [`begin_computer_turn`](Self::begin_computer_turn).
    pub fn finish_computer_turn(
        &mut self,
        choice: Option<Move>,
    ) -> Result<Option<AppliedMove>, GameError> {
        if !self.thinking {
            return Err(GameError::NotYourTurn);
        }
        self.thinking = false;

        let Some(mv) = choice else {
            tracing::info!(side = %COMPUTER, "computer has no moves");
            return Ok(None);
        };
        if !all_moves(&self.board, COMPUTER).contains(mv) {
            return Err(GameError::IllegalMove(mv));
        }

        let applied = self.apply_move(mv);
        self.turn = self.turn.opposite();
        Ok(Some(applied))
    }

    /// Applies a move to the game without any turn or legality checks.
    ///
    /// Records the capture, ends the game if a king was taken, and promotes a
    /// pawn reaching the far row. The side to move is not changed.
    ///
    /// # Panics
    /// Panics if `mv.from()` is empty.
    pub fn apply_move(&mut self, mv: Move) -> AppliedMove {
        let effect = self.board.make_move(mv);
        let mover = effect.piece.color;

        if let Some(captured) = effect.captured {
            self.captured[mover.index()].push(captured);
            if captured.kind == PieceKind::King {
                self.winner = Some(mover);
                tracing::info!(winner = %mover, "king captured, game over");
            }
        }
        tracing::debug!(%mv, piece = %effect.piece, promoted = effect.promoted, "move applied");

        AppliedMove {
            mv,
            piece: effect.piece,
            captured: effect.captured,
            promoted: effect.promoted,
            game_over: self.is_game_over(),
            winner: self.winner,
        }
    }

    fn check_accepting(&self, side: Color) -> Result<(), GameError> {
        if self.is_game_over() {
            Err(GameError::GameOver)
        } else if self.thinking {
            Err(GameError::Busy)
        } else if self.turn != side {
            Err(GameError::NotYourTurn)
        } else {
            Ok(())
        }
    }

    fn owns(&self, square: Square) -> bool {
        self.board
            .get(square)
            .is_some_and(|piece| piece.color == self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    fn game_from(placement: &str, turn: Color) -> GameState {
        GameState::from_board(
            Board::from_placement(placement).unwrap(),
            turn,
            SelectorConfig::deterministic(),
        )
    }

    #[test]
    fn new_game() {
        let game = GameState::new();
        assert_eq!(game.turn(), HUMAN);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert!(game.captured_by(Color::White).is_empty());
        assert!(game.captured_by(Color::Black).is_empty());
        assert!(!game.is_thinking());
        assert_eq!(game.board(), &Board::initial());
    }

    #[test]
    fn select_square_returns_destinations() {
        let mut game = GameState::new();
        assert_eq!(game.select_square(sq(6, 0)), vec![sq(5, 0), sq(4, 0)]);
        assert_eq!(game.selection().map(|s| s.square), Some(sq(6, 0)));
    }

    #[test]
    fn select_square_rejects_opponent_and_empty() {
        let mut game = GameState::new();
        assert!(game.select_square(sq(1, 0)).is_empty());
        assert!(game.select_square(sq(4, 4)).is_empty());
        assert!(game.selection().is_none());
    }

    #[test]
    fn play_move_flips_turn() {
        let mut game = GameState::new();
        let applied = game.play_move(sq(6, 4), sq(4, 4)).unwrap();
        assert_eq!(applied.mover(), Color::White);
        assert_eq!(applied.captured, None);
        assert_eq!(game.turn(), COMPUTER);
        assert_eq!(game.board().at(4, 4).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn play_move_rejects_illegal_destination() {
        let mut game = GameState::new();
        game.select_square(sq(6, 4));
        let before = game.board().clone();
        assert_eq!(
            game.play_move(sq(6, 4), sq(3, 4)),
            Err(GameError::IllegalMove(Move::new(sq(6, 4), sq(3, 4))))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.turn(), HUMAN);
        assert!(game.selection().is_none());
    }

    #[test]
    fn play_move_rejects_wrong_piece() {
        let mut game = GameState::new();
        assert_eq!(
            game.play_move(sq(1, 4), sq(2, 4)),
            Err(GameError::NotOwnPiece(sq(1, 4)))
        );
        assert_eq!(
            game.play_move(sq(4, 4), sq(3, 4)),
            Err(GameError::NotOwnPiece(sq(4, 4)))
        );
    }

    #[test]
    fn play_move_rejects_out_of_turn() {
        let mut game = GameState::new();
        game.play_move(sq(6, 4), sq(4, 4)).unwrap();
        assert_eq!(
            game.play_move(sq(6, 3), sq(4, 3)),
            Err(GameError::NotYourTurn)
        );
    }

    #[test]
    fn computer_move_rejected_on_human_turn() {
        let mut game = GameState::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(game.computer_move(&mut rng), Err(GameError::NotYourTurn));
        assert!(!game.is_thinking());
    }

    #[test]
    fn computer_replies_and_hands_back_turn() {
        let mut game = GameState::new();
        let mut rng = StdRng::seed_from_u64(3);
        game.play_move(sq(6, 4), sq(4, 4)).unwrap();
        let applied = game.computer_move(&mut rng).unwrap().unwrap();
        assert_eq!(applied.mover(), COMPUTER);
        assert_eq!(game.turn(), HUMAN);
        assert!(!game.is_thinking());
    }

    #[test]
    fn busy_while_thinking() {
        let mut game = game_from("4k3/8/8/8/8/8/8/4K3", COMPUTER);
        let snapshot = game.begin_computer_turn().unwrap();
        assert_eq!(&snapshot, game.board());
        assert!(game.is_thinking());

        assert_eq!(game.begin_computer_turn(), Err(GameError::Busy));
        assert_eq!(game.play_move(sq(7, 4), sq(6, 4)), Err(GameError::Busy));
        assert_eq!(game.click(sq(7, 4)), ClickOutcome::Ignored);
        assert!(game.select_square(sq(0, 4)).is_empty());

        let applied = game
            .finish_computer_turn(Some(Move::new(sq(0, 4), sq(1, 4))))
            .unwrap();
        assert!(applied.is_some());
        assert!(!game.is_thinking());
        assert_eq!(game.turn(), HUMAN);
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut game = game_from("4k3/8/8/8/8/8/8/4K3", COMPUTER);
        assert_eq!(
            game.finish_computer_turn(None),
            Err(GameError::NotYourTurn)
        );
    }

    #[test]
    fn finish_rejects_foreign_move() {
        let mut game = game_from("4k3/8/8/8/8/8/8/4K3", COMPUTER);
        game.begin_computer_turn().unwrap();
        let mv = Move::new(sq(7, 4), sq(6, 4));
        assert_eq!(
            game.finish_computer_turn(Some(mv)),
            Err(GameError::IllegalMove(mv))
        );
        assert!(!game.is_thinking());
        assert_eq!(game.turn(), COMPUTER);
    }

    #[test]
    fn computer_without_moves_keeps_turn() {
        let mut game = game_from("8/8/8/8/8/8/8/4K3", COMPUTER);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(game.computer_move(&mut rng), Ok(None));
        assert_eq!(game.turn(), COMPUTER);
        assert!(!game.is_thinking());
        assert!(!game.is_game_over());
    }

    #[test]
    fn capture_is_recorded_for_mover() {
        let mut game = game_from("4k3/8/8/8/8/8/8/R3p2K", HUMAN);
        let applied = game.play_move(sq(7, 0), sq(7, 4)).unwrap();
        assert_eq!(
            applied.captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(
            game.captured_by(Color::White),
            &[Piece::new(PieceKind::Pawn, Color::Black)]
        );
        assert!(game.captured_by(Color::Black).is_empty());
        assert!(!applied.game_over);
    }

    #[test]
    fn king_capture_ends_game_for_either_side() {
        let mut game = game_from("4k3/8/8/8/8/8/8/4Q3", HUMAN);
        let applied = game.play_move(sq(7, 4), sq(0, 4)).unwrap();
        assert!(applied.game_over);
        assert_eq!(applied.winner, Some(Color::White));
        assert_eq!(game.winner(), Some(Color::White));

        let mut game = game_from("4q3/8/8/8/8/8/8/4K3", COMPUTER);
        let applied = game.apply_move(Move::new(sq(0, 4), sq(7, 4)));
        assert!(applied.game_over);
        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(
            game.captured_by(Color::Black),
            &[Piece::new(PieceKind::King, Color::White)]
        );
    }

    #[test]
    fn no_moves_after_game_over() {
        let mut game = game_from("4k3/8/8/8/8/8/8/4Q2K", HUMAN);
        game.play_move(sq(7, 4), sq(0, 4)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(game.computer_move(&mut rng), Err(GameError::GameOver));
        assert_eq!(game.play_move(sq(7, 7), sq(6, 7)), Err(GameError::GameOver));
        assert_eq!(game.click(sq(7, 7)), ClickOutcome::Ignored);
    }

    #[test]
    fn promotion_through_play_move() {
        let mut game = game_from("4k3/P7/8/8/8/8/8/4K3", HUMAN);
        let applied = game.play_move(sq(1, 0), sq(0, 0)).unwrap();
        assert!(applied.promoted);
        assert_eq!(
            game.board().at(0, 0),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn click_select_then_move() {
        let mut game = GameState::new();
        match game.click(sq(6, 4)) {
            ClickOutcome::Selected(selection) => {
                assert_eq!(selection.square, sq(6, 4));
                assert_eq!(selection.targets, vec![sq(5, 4), sq(4, 4)]);
            }
            other => panic!("expected selection, got {:?}", other),
        }
        match game.click(sq(4, 4)) {
            ClickOutcome::Moved(applied) => assert_eq!(applied.mv, Move::new(sq(6, 4), sq(4, 4))),
            other => panic!("expected move, got {:?}", other),
        }
        assert_eq!(game.turn(), COMPUTER);
    }

    #[test]
    fn click_elsewhere_deselects_without_reselecting() {
        let mut game = GameState::new();
        game.click(sq(6, 4));
        assert_eq!(game.click(sq(6, 3)), ClickOutcome::Deselected);
        assert!(game.selection().is_none());
        assert!(matches!(game.click(sq(6, 3)), ClickOutcome::Selected(_)));
    }

    #[test]
    fn click_on_opponent_is_ignored() {
        let mut game = GameState::new();
        assert_eq!(game.click(sq(1, 4)), ClickOutcome::Ignored);
        assert_eq!(game.click(sq(4, 4)), ClickOutcome::Ignored);
    }

    #[test]
    fn reset_restores_start() {
        let mut game = game_from("4k3/8/8/8/8/8/8/4Q3", HUMAN);
        game.play_move(sq(7, 4), sq(0, 4)).unwrap();
        game.reset();
        assert!(!game.is_game_over());
        assert_eq!(game.turn(), HUMAN);
        assert_eq!(game.board(), &Board::initial());
        assert!(game.captured_by(Color::White).is_empty());
        assert_eq!(game.selector().config(), &SelectorConfig::deterministic());
    }

    #[test]
    fn error_display() {
        let err = GameError::IllegalMove(Move::new(sq(6, 4), sq(3, 4)));
        assert_eq!(err.to_string(), "illegal move: e2e5");
        assert_eq!(
            GameError::NotOwnPiece(sq(1, 0)).to_string(),
            "no piece of the side to move on a7"
        );
    }
}
