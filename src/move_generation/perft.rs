//! Perft: exhaustive leaf counting used to validate move generation against
//! published reference numbers.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

/// Leaf count at `depth`. Uses push/pop, so the state is unchanged on return.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game_state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        game_state.push(mv);
        nodes += perft(game_state, depth - 1);
        game_state.pop();
    }
    nodes
}

/// Leaf count plus per-leaf move statistics, in the layout of the usual
/// perft result tables.
pub fn perft_counts(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(game_state, depth, &mut counts);
    counts
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    for mv in game_state.legal_moves() {
        game_state.push(mv);

        if depth == 1 {
            counts.nodes += 1;
            if mv.is_capture() {
                counts.captures += 1;
            }
            if mv.is_en_passant() {
                counts.en_passant += 1;
            }
            if mv.is_castling() {
                counts.castles += 1;
            }
            if mv.promotion().is_some() {
                counts.promotions += 1;
            }
            if is_king_in_check(game_state, game_state.side_to_move) {
                counts.checks += 1;
                if !game_state.has_legal_move() {
                    counts.checkmates += 1;
                }
            }
        } else {
            perft_recurse(game_state, depth - 1, counts);
        }

        game_state.pop();
    }
}

/// Per-root-move leaf counts, for bisecting a perft mismatch.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(String, u64)> {
    let mut out = Vec::new();
    if depth == 0 {
        return out;
    }
    for mv in game_state.legal_moves() {
        game_state.push(mv);
        out.push((mv.to_uci(), perft(game_state, depth - 1)));
        game_state.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn nodes(fen: &str, depth: u8) -> u64 {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let n = perft(&mut game, depth);
        assert_eq!(game, before, "perft must leave the state untouched");
        n
    }

    #[test]
    fn start_position_reference_counts() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&mut game, 0), 1);
        assert_eq!(perft(&mut game, 1), 20);
        assert_eq!(perft(&mut game, 2), 400);
        assert_eq!(
            perft_counts(&mut game, 3),
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_reference_counts() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        assert_eq!(
            perft_counts(&mut game, 2),
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn endgame_with_en_passant_pins() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(nodes(fen, 1), 14);
        assert_eq!(nodes(fen, 2), 191);
        assert_eq!(nodes(fen, 3), 2812);
    }

    #[test]
    fn promotion_heavy_position() {
        let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
        assert_eq!(nodes(fen, 1), 6);
        assert_eq!(nodes(fen, 2), 264);
        assert_eq!(nodes(fen, 3), 9467);
    }

    #[test]
    fn castling_rights_edge_position() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert_eq!(nodes(fen, 1), 44);
        assert_eq!(nodes(fen, 2), 1486);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::new_game();
        let divided = perft_divide(&mut game, 2);
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }
}
