//! Pseudo-legal move generation.
//!
//! Moves obey each piece's movement rules but are not filtered for leaving
//! the mover's own king capturable. There is no castling and no en passant.
//!
//! Generation order is fixed and observable: [`all_moves`] walks source
//! squares in row-major order, and each piece emits its destinations in the
//! order of the offset tables below. The move selector breaks score ties in
//! favour of the earliest move, so this order is part of the contract.

use crate::Board;
use kingfall_core::{Color, Move, PieceKind, Square};

/// Orthogonal ray directions as (row, col) deltas.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions as (row, col) deltas.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Queen rays: orthogonal first, then diagonal. Also the king's step set.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Knight jumps as (row, col) deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// A list of moves in generation order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns true if the list contains the move.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns the destinations reachable by the piece on `from`.
///
/// Returns an empty list if the square is empty.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let mut targets = Vec::new();
    let Some(piece) = board.get(from) else {
        return targets;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, piece.color, &mut targets),
        PieceKind::Knight => step_targets(board, from, piece.color, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::Bishop => {
            ray_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut targets)
        }
        PieceKind::Rook => ray_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut targets),
        PieceKind::Queen => ray_targets(board, from, piece.color, &QUEEN_DIRECTIONS, &mut targets),
        PieceKind::King => step_targets(board, from, piece.color, &QUEEN_DIRECTIONS, &mut targets),
    }

    targets
}

/// Generates every pseudo-legal move for `color`.
pub fn all_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces_of(color) {
        for to in pseudo_legal_moves(board, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

fn pawn_targets(board: &Board, from: Square, color: Color, targets: &mut Vec<Square>) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.get(one).is_none() {
            targets.push(one);
            if from.row() == color.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.get(two).is_none() {
                        targets.push(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(diag) = from.offset(dir, dc) {
            if board.get(diag).is_some_and(|p| p.color != color) {
                targets.push(diag);
            }
        }
    }
}

fn step_targets(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if board.get(to).map_or(true, |p| p.color != color) {
                targets.push(to);
            }
        }
    }
}

fn ray_targets(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(dr, dc) in directions {
        let mut cursor = from.offset(dr, dc);
        while let Some(to) = cursor {
            match board.get(to) {
                None => targets.push(to),
                Some(blocker) => {
                    if blocker.color != color {
                        targets.push(to);
                    }
                    break;
                }
            }
            cursor = to.offset(dr, dc);
        }
    }
}
