//! Text rendering of the game for the terminal.

use kingfall_core::{Color, Piece, Square};
use kingfall_engine::{AppliedMove, GameState, COMPUTER, HUMAN};
use std::fmt::Write;

/// Renders the board with row/column labels.
///
/// Destinations of the current selection are marked with `*` (empty) or
/// `x` (capture), and the selected square is bracketed.
pub fn board(game: &GameState) -> String {
    let selection = game.selection();
    let is_target = |sq: Square| selection.is_some_and(|s| s.targets.contains(&sq));
    let mut out = String::new();

    for row in 0..8u8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8u8 {
            let sq = Square::at(row, col);
            let piece = game.board().get(sq);
            let glyph = match piece {
                Some(_) if is_target(sq) => 'x',
                Some(p) => p.to_char(),
                None if is_target(sq) => '*',
                None if (row + col) % 2 == 0 => '.',
                None => ':',
            };
            if selection.is_some_and(|s| s.square == sq) {
                let _ = write!(out, "[{}", glyph);
            } else if col > 0 && selection.is_some_and(|s| s.square == Square::at(row, col - 1)) {
                let _ = write!(out, "]{}", glyph);
            } else {
                let _ = write!(out, " {}", glyph);
            }
        }
        if selection.is_some_and(|s| s.square == Square::at(row, 7)) {
            out.push(']');
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}

/// Renders the turn, captures, and outcome.
pub fn status(game: &GameState) -> String {
    let mut out = String::new();
    match game.winner() {
        Some(winner) if winner == HUMAN => out.push_str("Game over: you win!\n"),
        Some(_) => out.push_str("Game over: the computer wins. Type 'new' to play again.\n"),
        None if game.is_thinking() => out.push_str("Computer is thinking...\n"),
        None => {
            let _ = writeln!(out, "Turn: {} ({})", game.turn(), side_label(game.turn()));
        }
    }
    let _ = writeln!(out, "You captured:      {}", pieces(game.captured_by(HUMAN)));
    let _ = writeln!(out, "Computer captured: {}", pieces(game.captured_by(COMPUTER)));
    out
}

/// Describes a move that was just played.
pub fn applied(applied: &AppliedMove) -> String {
    let mover = if applied.mover() == HUMAN { "You" } else { "Computer" };
    let mut out = format!("{}: {} {}", mover, applied.piece.kind, applied.mv);
    if let Some(captured) = applied.captured {
        let _ = write!(out, ", capturing {}", captured.kind);
    }
    if applied.promoted {
        out.push_str(", promoting to Queen");
    }
    out
}

/// Lists destination squares.
pub fn targets(from: Square, targets: &[Square]) -> String {
    if targets.is_empty() {
        return format!("{}: no moves", from);
    }
    let list: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
    format!("{}: {}", from, list.join(" "))
}

fn side_label(color: Color) -> &'static str {
    if color == HUMAN {
        "you"
    } else {
        "computer"
    }
}

fn pieces(list: &[Piece]) -> String {
    if list.is_empty() {
        return "-".to_string();
    }
    let symbols: Vec<String> = list.iter().map(|p| p.symbol().to_string()).collect();
    symbols.join(" ")
}
