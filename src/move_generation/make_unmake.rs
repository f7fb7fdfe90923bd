//! In-place move application and reversal.
//!
//! `push` mutates the state and records an `UndoState`; `pop` restores the
//! exact prior state from that record. A sequence of pushes followed by the
//! same number of pops leaves the state equal (`==`) to where it started.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_state::zobrist::compute_zobrist_key;
use crate::move_generation::legal_move_checks::{
    castling_rook_squares, en_passant_victim_square, move_keeps_king_safe,
};
use crate::moves::chess_move::Move;

impl GameState {
    /// Play `mv`, which must be legal in the current position.
    ///
    /// Pushing an illegal move is a caller bug; debug builds assert on it.
    pub fn push(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opposite();
        debug_assert!(
            self.pieces[us.index()][mv.moved_piece().index()] & square_bit(mv.from()) != 0,
            "push: no {:?} of the side to move on the origin of {mv}",
            mv.moved_piece()
        );
        debug_assert!(
            move_keeps_king_safe(self, mv),
            "push: {mv} leaves the king in check"
        );

        self.undo_stack.push(UndoState {
            mv,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_zobrist_key: self.zobrist_key,
        });

        let from_bit = square_bit(mv.from());
        let to_bit = square_bit(mv.to());

        self.pieces[us.index()][mv.moved_piece().index()] &= !from_bit;
        if mv.is_en_passant() {
            if let Some(victim) = en_passant_victim_square(us, mv.to()) {
                self.pieces[them.index()][PieceKind::Pawn.index()] &= !square_bit(victim);
            }
        } else if let Some(captured) = mv.captured_piece() {
            self.pieces[them.index()][captured.index()] &= !to_bit;
        }
        let landing = mv.promotion().unwrap_or(mv.moved_piece());
        self.pieces[us.index()][landing.index()] |= to_bit;

        if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to()) {
                let rooks = &mut self.pieces[us.index()][PieceKind::Rook.index()];
                *rooks &= !square_bit(rook_from);
                *rooks |= square_bit(rook_to);
            }
        }

        self.castling_rights &= !(rights_lost_at(mv.from()) | rights_lost_at(mv.to()));

        self.en_passant_square = if mv.is_double_pawn_push() {
            Some((mv.from() + mv.to()) / 2)
        } else {
            None
        };

        if mv.moved_piece() == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = them;

        self.recalc_occupancy();
        self.zobrist_key = compute_zobrist_key(self);
        self.key_history.push(self.zobrist_key);
    }

    /// Undo the most recent `push`. Returns `None` when nothing was pushed.
    pub fn pop(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        let mv = undo.mv;
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;

        let from_bit = square_bit(mv.from());
        let to_bit = square_bit(mv.to());

        let landing = mv.promotion().unwrap_or(mv.moved_piece());
        self.pieces[us.index()][landing.index()] &= !to_bit;
        self.pieces[us.index()][mv.moved_piece().index()] |= from_bit;

        if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to()) {
                let rooks = &mut self.pieces[us.index()][PieceKind::Rook.index()];
                *rooks &= !square_bit(rook_to);
                *rooks |= square_bit(rook_from);
            }
        }

        if mv.is_en_passant() {
            if let Some(victim) = en_passant_victim_square(us, mv.to()) {
                self.pieces[them.index()][PieceKind::Pawn.index()] |= square_bit(victim);
            }
        } else if let Some(captured) = mv.captured_piece() {
            self.pieces[them.index()][captured.index()] |= to_bit;
        }

        self.side_to_move = us;
        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.zobrist_key = undo.prev_zobrist_key;
        self.key_history.pop();
        self.recalc_occupancy();

        Some(mv)
    }

    /// The move `pop` would undo next.
    #[inline]
    pub fn peek(&self) -> Option<Move> {
        self.undo_stack.last().map(|undo| undo.mv)
    }
}

/// Castling rights that vanish once anything moves from or onto `square`.
#[inline]
fn rights_lost_at(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
