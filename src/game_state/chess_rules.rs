//! Canonical chess-rule constants.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the game ends automatically (75 full moves).
pub const SEVENTY_FIVE_MOVE_HALFMOVES: u16 = 150;

/// Occurrences of one position that end the game automatically.
pub const FIVEFOLD_REPETITION_COUNT: usize = 5;

/// Squares of the a1-h8 colour complex (a1 is a dark square).
pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
pub const LIGHT_SQUARES: u64 = !DARK_SQUARES;
