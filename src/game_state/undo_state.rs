use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Everything `pop` needs to restore the position that existed before `push`.
///
/// The move itself carries the moved and captured piece kinds, so only the
/// irreversible scalar fields are recorded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_zobrist_key: u64,
}
