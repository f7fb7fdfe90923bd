//! Attack detection and king-safety checks.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use crate::moves::chess_move::Move;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    (kings != 0).then(|| kings.trailing_zeros() as Square)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    match king_square(game_state, color) {
        Some(king_sq) => is_square_attacked(game_state, king_sq, color.opposite()),
        None => false,
    }
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker: Color) -> bool {
    square_attacked_on(&game_state.pieces, game_state.occupancy_all, square, attacker)
}

/// Attack test on raw bitboards, so callers can probe hypothetical layouts
/// without touching a `GameState`.
pub fn square_attacked_on(
    pieces: &[[u64; 6]; 2],
    occupancy: u64,
    square: Square,
    attacker: Color,
) -> bool {
    let theirs = &pieces[attacker.index()];

    // A pawn of `attacker` hits `square` iff a pawn of the defender on
    // `square` would hit the pawn's square.
    if pawn_attacks(attacker.opposite(), square) & theirs[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if knight_attacks(square) & theirs[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if king_attacks(square) & theirs[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = theirs[PieceKind::Queen.index()];
    let diagonal = theirs[PieceKind::Bishop.index()] | queens;
    if diagonal != 0 && bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }
    let straight = theirs[PieceKind::Rook.index()] | queens;
    straight != 0 && rook_attacks(square, occupancy) & straight != 0
}

/// Whether playing the pseudo-legal `mv` leaves the mover's king unattacked.
///
/// Simulates the move on a copy of the bitboards only; the state itself is
/// not modified.
pub fn move_keeps_king_safe(game_state: &GameState, mv: Move) -> bool {
    let us = game_state.side_to_move;
    let them = us.opposite();
    let mut pieces = game_state.pieces;

    let from_bit = square_bit(mv.from());
    let to_bit = square_bit(mv.to());

    pieces[us.index()][mv.moved_piece().index()] &= !from_bit;
    if mv.is_en_passant() {
        if let Some(victim) = en_passant_victim_square(us, mv.to()) {
            pieces[them.index()][PieceKind::Pawn.index()] &= !square_bit(victim);
        }
    } else if mv.is_capture() {
        for bb in pieces[them.index()].iter_mut() {
            *bb &= !to_bit;
        }
    }
    let landing = mv.promotion().unwrap_or(mv.moved_piece());
    pieces[us.index()][landing.index()] |= to_bit;

    if mv.is_castling() {
        if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to()) {
            let rooks = &mut pieces[us.index()][PieceKind::Rook.index()];
            *rooks &= !square_bit(rook_from);
            *rooks |= square_bit(rook_to);
        }
    }

    let occupancy = pieces
        .iter()
        .flat_map(|side| side.iter())
        .fold(0u64, |acc, bb| acc | bb);
    let king_bb = pieces[us.index()][PieceKind::King.index()];
    if king_bb == 0 {
        return true;
    }
    let king_sq = king_bb.trailing_zeros() as Square;

    !square_attacked_on(&pieces, occupancy, king_sq, them)
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
pub fn en_passant_victim_square(mover: Color, to: Square) -> Option<Square> {
    match mover {
        Color::White => to.checked_sub(8),
        Color::Black => to.checked_add(8).filter(|sq| *sq < 64),
    }
}

/// Rook origin and destination for a king castling to `king_to`.
#[inline]
pub fn castling_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        6 => Some((7, 5)),
        2 => Some((0, 3)),
        62 => Some((63, 61)),
        58 => Some((56, 59)),
        _ => None,
    }
}
