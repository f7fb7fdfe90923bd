use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{Move, FLAG_CAPTURE};

#[inline]
pub fn piece_on_square_for_color(
    game_state: &GameState,
    color: Color,
    square: Square,
) -> Option<PieceKind> {
    let mask = square_bit(square);
    if game_state.occupancy_by_color[color.index()] & mask == 0 {
        return None;
    }
    PieceKind::ALL
        .into_iter()
        .find(|kind| game_state.pieces[color.index()][kind.index()] & mask != 0)
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    piece_on_square_for_color(game_state, game_state.side_to_move.opposite(), square)
}

/// Emit one move per set bit of `targets`, ascending by destination square.
///
/// `targets` must already exclude the mover's own pieces.
pub fn push_target_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    mut targets: u64,
    out: &mut Vec<Move>,
) {
    let enemy_occ = game_state.occupancy_by_color[game_state.side_to_move.opposite().index()];
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;

        if square_bit(to) & enemy_occ != 0 {
            let captured = enemy_piece_on(game_state, to);
            out.push(Move::new(from, to, kind, captured, None, FLAG_CAPTURE));
        } else {
            out.push(Move::new(from, to, kind, None, None, 0));
        }
    }
}
