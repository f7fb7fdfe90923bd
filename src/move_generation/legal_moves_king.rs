use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{castling_rook_squares, is_square_attacked};
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::attacks::king_attacks;
use crate::moves::chess_move::{Move, FLAG_CASTLING};

struct CastlingPath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    /// Squares between king and rook that must be empty.
    empty: u64,
    /// Squares the king crosses or lands on, which must not be attacked.
    transit: [Square; 2],
}

const WHITE_PATHS: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        empty: square_bit(5) | square_bit(6),
        transit: [5, 6],
    },
    CastlingPath {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        empty: square_bit(1) | square_bit(2) | square_bit(3),
        transit: [3, 2],
    },
];

const BLACK_PATHS: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        empty: square_bit(61) | square_bit(62),
        transit: [61, 62],
    },
    CastlingPath {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        empty: square_bit(57) | square_bit(58) | square_bit(59),
        transit: [59, 58],
    },
];

pub fn generate_king_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let king_bb = game_state.pieces[side.index()][PieceKind::King.index()];
    if king_bb == 0 {
        return;
    }

    let from = king_bb.trailing_zeros() as Square;
    push_target_moves(game_state, from, PieceKind::King, king_attacks(from) & !own_occ, out);

    generate_castling_moves(game_state, out, from);
}

fn generate_castling_moves(game_state: &GameState, out: &mut Vec<Move>, king_from: Square) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let paths = match side {
        Color::White => &WHITE_PATHS,
        Color::Black => &BLACK_PATHS,
    };
    let rook_bb = game_state.pieces[side.index()][PieceKind::Rook.index()];

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    for path in paths {
        if king_from != path.king_from || game_state.castling_rights & path.right == 0 {
            continue;
        }
        let Some((rook_from, _)) = castling_rook_squares(path.king_to) else {
            continue;
        };
        if rook_bb & square_bit(rook_from) == 0 || game_state.occupancy_all & path.empty != 0 {
            continue;
        }
        if path
            .transit
            .iter()
            .any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }
        out.push(Move::new(
            path.king_from,
            path.king_to,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::game_state::GameState;

    fn king_moves(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&game, &mut out);
        out.iter().map(|m| m.to_uci()).collect()
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&"e1g1".to_owned()));
        assert!(moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn cannot_castle_through_attacked_square() {
        // Black rook on f8 covers f1.
        let moves = king_moves("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.contains(&"e1g1".to_owned()));
        assert!(moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let moves = king_moves("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.contains(&"e1g1".to_owned()));
        assert!(!moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_occupied() {
        // b1 attacked by the rook on b8, which does not stop O-O-O.
        let moves = king_moves("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.contains(&"e1c1".to_owned()));

        let moves = king_moves("7k/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn missing_rook_blocks_castling_even_with_rights() {
        let moves = king_moves("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1");
        assert_eq!(moves.len(), 5);
    }
}
