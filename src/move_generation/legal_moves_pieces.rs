//! Knight and slider move generation.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::attacks::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_for_kind(game_state, PieceKind::Knight, out, |from, _| knight_attacks(from));
}

pub fn generate_bishop_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_for_kind(game_state, PieceKind::Bishop, out, bishop_attacks);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_for_kind(game_state, PieceKind::Rook, out, rook_attacks);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_for_kind(game_state, PieceKind::Queen, out, queen_attacks);
}

fn generate_for_kind(
    game_state: &GameState,
    kind: PieceKind,
    out: &mut Vec<Move>,
    attacks: impl Fn(Square, u64) -> u64,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];

    let mut pieces = game_state.pieces[side.index()][kind.index()];
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        pieces &= pieces - 1;

        let targets = attacks(from, game_state.occupancy_all) & !own_occ;
        push_target_moves(game_state, from, kind, targets, out);
    }
}
