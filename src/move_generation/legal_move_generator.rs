//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves piece by piece in a fixed order (pawns,
//! knights, bishops, rooks, queens, king; origin squares ascending) and
//! drops every move that would leave the mover's king attacked.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::move_keeps_king_safe;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::chess_move::Move;

pub fn generate_pseudo_legal_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_pawn_moves(game_state, out);
    generate_knight_moves(game_state, out);
    generate_bishop_moves(game_state, out);
    generate_rook_moves(game_state, out);
    generate_queen_moves(game_state, out);
    generate_king_moves(game_state, out);
}

pub fn generate_legal_moves(game_state: &GameState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, &mut moves);
    moves.retain(|&mv| move_keeps_king_safe(game_state, mv));
    moves
}

impl GameState {
    /// Every legal move for the side to move, in generation order.
    #[inline]
    pub fn legal_moves(&self) -> Vec<Move> {
        generate_legal_moves(self)
    }

    pub fn has_legal_move(&self) -> bool {
        let mut moves = Vec::with_capacity(64);
        generate_pseudo_legal_moves(self, &mut moves);
        moves.into_iter().any(|mv| move_keeps_king_safe(self, mv))
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }
}
