//! Terminal board renderer.
//!
//! Prints FEN piece letters (upper case White, lower case Black) with `.` for
//! empty squares, rank 8 at the top, framed by file and rank labels.

use crate::game_state::game_state::GameState;

/// Render the board to a plain ASCII string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::with_capacity(200);

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let label = char::from(b'1' + rank);
        out.push(label);
        out.push(' ');

        for file in 0..8u8 {
            match game_state.piece_at(rank * 8 + file) {
                Some(piece) => out.push(piece.fen_char()),
                None => out.push('.'),
            }
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}
