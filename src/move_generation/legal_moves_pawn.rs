//! Pawn pushes, double pushes, captures, en passant and promotions.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::attacks::pawn_attacks;
use crate::moves::chess_move::{Move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let (start_rank, promotion_rank) = match side {
        Color::White => (1u8, 7u8),
        Color::Black => (6u8, 0u8),
    };

    let mut pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let one_step = match side {
            Color::White => from + 8,
            Color::Black => from - 8,
        };

        if square_bit(one_step) & empty != 0 {
            if square_rank(one_step) == promotion_rank {
                push_promotions(out, from, one_step, None, 0);
            } else {
                out.push(Move::new(from, one_step, PieceKind::Pawn, None, None, 0));

                if square_rank(from) == start_rank {
                    let two_step = match side {
                        Color::White => from + 16,
                        Color::Black => from - 16,
                    };
                    if square_bit(two_step) & empty != 0 {
                        out.push(Move::new(
                            from,
                            two_step,
                            PieceKind::Pawn,
                            None,
                            None,
                            FLAG_DOUBLE_PAWN_PUSH,
                        ));
                    }
                }
            }
        }

        let mut targets = pawn_attacks(side, from) & enemy_occ;
        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            targets &= targets - 1;

            let captured = enemy_piece_on(game_state, to);
            if square_rank(to) == promotion_rank {
                push_promotions(out, from, to, captured, FLAG_CAPTURE);
            } else {
                out.push(Move::new(from, to, PieceKind::Pawn, captured, None, FLAG_CAPTURE));
            }
        }

        if let Some(ep) = game_state.en_passant_square {
            if pawn_attacks(side, from) & square_bit(ep) != 0 {
                out.push(Move::new(
                    from,
                    ep,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn push_promotions(
    out: &mut Vec<Move>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u32,
) {
    for promo in PieceKind::PROMOTIONS {
        out.push(Move::new(from, to, PieceKind::Pawn, captured, Some(promo), flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;

    fn pawn_moves(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        out.iter().map(|m| m.to_uci()).collect()
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        assert_eq!(pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), ["e2e3", "e2e4"]);
    }

    #[test]
    fn blocked_pawn_cannot_push() {
        assert!(pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").is_empty());
    }

    #[test]
    fn promotions_come_in_fixed_order() {
        assert_eq!(
            pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1"),
            ["a7a8n", "a7a8b", "a7a8r", "a7a8q", "a7b8n", "a7b8b", "a7b8r", "a7b8q"]
        );
    }

    #[test]
    fn black_en_passant_capture_is_generated() {
        let moves = pawn_moves("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
        assert_eq!(moves, ["d4d3", "d4e3"]);
    }
}
