//! Packed move representation.
//!
//! A `Move` is a 32-bit value carrying the origin and destination squares,
//! the moving piece, the captured piece (if any), the promotion piece (if any)
//! and a handful of special-move flags. Carrying the captured piece lets
//! `pop` restore a position without consulting anything but the undo record.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const MOVED_PIECE_SHIFT: u32 = 12;
const CAPTURED_PIECE_SHIFT: u32 = 15;
const PROMOTION_PIECE_SHIFT: u32 = 18;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
const NO_PIECE_CODE: u32 = 0x7;

pub const FLAG_CAPTURE: u32 = 1 << 21;
pub const FLAG_DOUBLE_PAWN_PUSH: u32 = 1 << 22;
pub const FLAG_EN_PASSANT: u32 = 1 << 23;
pub const FLAG_CASTLING: u32 = 1 << 24;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        flags: u32,
    ) -> Self {
        let mut packed = 0u32;
        packed |= u32::from(from) << FROM_SHIFT;
        packed |= u32::from(to) << TO_SHIFT;
        packed |= piece_code(Some(moved_piece)) << MOVED_PIECE_SHIFT;
        packed |= piece_code(captured_piece) << CAPTURED_PIECE_SHIFT;
        packed |= piece_code(promotion_piece) << PROMOTION_PIECE_SHIFT;
        packed |= flags;
        Self(packed)
    }

    #[inline]
    pub fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn moved_piece(self) -> PieceKind {
        // Every constructor path stores a real piece here.
        piece_from_code((self.0 >> MOVED_PIECE_SHIFT) & PIECE_MASK).unwrap_or(PieceKind::Pawn)
    }

    #[inline]
    pub fn captured_piece(self) -> Option<PieceKind> {
        piece_from_code((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub fn promotion(self) -> Option<PieceKind> {
        piece_from_code((self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.0 & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_double_pawn_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    /// Coordinate notation (`e2e4`, `e7e8q`).
    pub fn to_uci(self) -> String {
        let mut out = String::with_capacity(5);
        out.push_str(&square_name(self.from()));
        out.push_str(&square_name(self.to()));
        if let Some(promo) = self.promotion() {
            out.push(promotion_char(promo));
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

#[inline]
fn piece_code(piece: Option<PieceKind>) -> u32 {
    piece.map(|p| p.index() as u32).unwrap_or(NO_PIECE_CODE)
}

#[inline]
fn piece_from_code(code: u32) -> Option<PieceKind> {
    PieceKind::from_index(code as usize)
}

pub(crate) fn promotion_char(piece: PieceKind) -> char {
    match piece {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, FLAG_CAPTURE, FLAG_EN_PASSANT};
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn packed_fields_read_back() {
        let mv = Move::new(
            52,
            61,
            PieceKind::Pawn,
            Some(PieceKind::Bishop),
            Some(PieceKind::Queen),
            FLAG_CAPTURE,
        );
        assert_eq!(mv.from(), 52);
        assert_eq!(mv.to(), 61);
        assert_eq!(mv.moved_piece(), PieceKind::Pawn);
        assert_eq!(mv.captured_piece(), Some(PieceKind::Bishop));
        assert_eq!(mv.promotion(), Some(PieceKind::Queen));
        assert!(mv.is_capture());
        assert!(!mv.is_en_passant());
        assert_eq!(mv.to_string(), "e7f8q");
    }

    #[test]
    fn quiet_move_has_no_optional_pieces() {
        let mv = Move::new(12, 28, PieceKind::Pawn, None, None, 0);
        assert_eq!(mv.captured_piece(), None);
        assert_eq!(mv.promotion(), None);
        assert!(!mv.is_capture());
        assert_eq!(mv.to_uci(), "e2e4");
    }

    #[test]
    fn en_passant_flag_is_independent() {
        let mv = Move::new(
            36,
            43,
            PieceKind::Pawn,
            Some(PieceKind::Pawn),
            None,
            FLAG_CAPTURE | FLAG_EN_PASSANT,
        );
        assert!(mv.is_en_passant());
        assert!(!mv.is_castling());
        assert_eq!(format!("{mv:?}"), "Move(e5d6)");
    }
}
