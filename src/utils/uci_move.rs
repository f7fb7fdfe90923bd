//! Coordinate move strings (`e2e4`, `e7e8q`).
//!
//! Parsing is split in two steps so callers can tell a malformed string apart
//! from a well-formed move that is not legal in the current position.

use std::fmt;

use crate::errors::MoveInputError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{promotion_char, Move};
use crate::utils::algebraic::{parse_square, square_name};

/// A syntactically valid coordinate move, not yet checked against a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl UciMove {
    #[inline]
    pub fn matches(&self, mv: Move) -> bool {
        mv.from() == self.from && mv.to() == self.to && mv.promotion() == self.promotion
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_name(self.from))?;
        f.write_str(&square_name(self.to))?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promotion_char(promo))?;
        }
        Ok(())
    }
}

impl From<Move> for UciMove {
    fn from(mv: Move) -> Self {
        Self {
            from: mv.from(),
            to: mv.to(),
            promotion: mv.promotion(),
        }
    }
}

/// Format check only: two squares and an optional `n`/`b`/`r`/`q` suffix.
pub fn parse_uci_move(text: &str) -> Result<UciMove, MoveInputError> {
    let trimmed = text.trim();
    let invalid = || MoveInputError::InvalidMoveFormat(trimmed.to_owned());

    if !trimmed.is_ascii() || !(4..=5).contains(&trimmed.len()) {
        return Err(invalid());
    }

    let from = parse_square(&trimmed[0..2]).ok_or_else(invalid)?;
    let to = parse_square(&trimmed[2..4]).ok_or_else(invalid)?;
    if from == to {
        return Err(invalid());
    }

    let promotion = match trimmed.as_bytes().get(4) {
        None => None,
        Some(b'n') => Some(PieceKind::Knight),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'q') => Some(PieceKind::Queen),
        Some(_) => return Err(invalid()),
    };

    Ok(UciMove {
        from,
        to,
        promotion,
    })
}

/// Parse `text` and match it against the legal moves of `game_state`.
pub fn resolve_uci_move(game_state: &GameState, text: &str) -> Result<Move, MoveInputError> {
    let parsed = parse_uci_move(text)?;
    game_state
        .legal_moves()
        .into_iter()
        .find(|&mv| parsed.matches(mv))
        .ok_or_else(|| MoveInputError::IllegalMove(parsed.to_string()))
}
