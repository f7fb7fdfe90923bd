//! Piece-square bonus tables.
//!
//! Tables are written the way a board diagram reads from White's side: the
//! first row is the eighth rank, the last row the first rank. Use
//! `white_index` / `black_index` to look a square up for either colour.

use crate::game_state::chess_types::Square;

#[rustfmt::skip]
pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

/// Table index for a White piece on `square` (a1 = 0).
#[inline]
pub const fn white_index(square: Square) -> usize {
    (square ^ 56) as usize
}

/// Table index for a Black piece on `square`: the board seen from Black's
/// side, which is the rank-flip of White's view.
#[inline]
pub const fn black_index(square: Square) -> usize {
    square as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_squares_share_a_bonus() {
        // e2 for White and e7 for Black are the same square from each side.
        assert_eq!(PAWN_TABLE[white_index(12)], -20);
        assert_eq!(PAWN_TABLE[black_index(52)], -20);
        // Seventh-rank pawns are about to promote.
        assert_eq!(PAWN_TABLE[white_index(52)], 50);
        assert_eq!(PAWN_TABLE[black_index(12)], 50);
    }

    #[test]
    fn knight_table_is_left_right_symmetric() {
        for rank in 0..8 {
            for file in 0..4 {
                assert_eq!(KNIGHT_TABLE[rank * 8 + file], KNIGHT_TABLE[rank * 8 + 7 - file]);
            }
        }
    }
}
