//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys come from a fixed splitmix64 seed so hashes are identical across runs.

use std::sync::OnceLock;

use crate::game_state::chess_types::*;
use crate::moves::attacks::pawn_attacks;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = splitmix64(&mut seed);
            }
        }
    }

    let black_to_move = splitmix64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = splitmix64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = splitmix64(&mut seed);
    }

    ZobristTables {
        piece_square,
        black_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Full key of the position.
///
/// The en-passant file only contributes when a pawn of the side to move
/// stands next to the target, so a double push nobody can answer does not
/// make an otherwise identical position look different.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for color in Color::ALL {
        for piece in PieceKind::ALL {
            let mut bb = game_state.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                key ^= tables.piece_square[color.index()][piece.index()][sq];
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Black {
        key ^= tables.black_to_move;
    }

    key ^= tables.castling[(game_state.castling_rights & 0x0F) as usize];

    if let Some(ep) = game_state.en_passant_square {
        let us = game_state.side_to_move;
        let our_pawns = game_state.pieces[us.index()][PieceKind::Pawn.index()];
        // Squares from which one of our pawns would attack the target.
        if pawn_attacks(us.opposite(), ep) & our_pawns != 0 {
            key ^= tables.en_passant_file[(ep % 8) as usize];
        }
    }

    key
}
