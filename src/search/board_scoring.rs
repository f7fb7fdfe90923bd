//! Static position evaluation.
//!
//! Search stays independent of the heuristic by scoring through the
//! `BoardScorer` trait. Scores are always from White's point of view:
//! positive favours White, negative favours Black.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::tables::piece_square::{black_index, white_index, KNIGHT_TABLE, PAWN_TABLE};

/// Centipawn score, White-relative.
pub type Score = i32;

/// Score of a position in which Black is checkmated. Above any reachable
/// material balance so a mate always outranks winning material.
pub const MATE_SCORE: Score = 100_000;

/// Bound seeded into alpha/beta at the root. Strictly outside every score
/// the evaluator can return.
pub const SCORE_INFINITY: Score = 1_000_000;

pub trait BoardScorer {
    /// White-relative score of `game_state`.
    fn score(&self, game_state: &GameState) -> Score;
}

/// Material plus pawn and knight placement bonuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> Score {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    /// Placement bonus for `piece` on `square`; zero for kinds without a table.
    #[inline]
    pub fn square_bonus(piece: Piece, square: Square) -> Score {
        let index = match piece.color {
            Color::White => white_index(square),
            Color::Black => black_index(square),
        };
        match piece.kind {
            PieceKind::Pawn => PAWN_TABLE[index],
            PieceKind::Knight => KNIGHT_TABLE[index],
            _ => 0,
        }
    }

    /// Material and placement balance, ignoring whether the game is over.
    pub fn material_and_placement(game_state: &GameState) -> Score {
        let mut score = 0;

        for color in Color::ALL {
            let sign = match color {
                Color::White => 1,
                Color::Black => -1,
            };
            for kind in PieceKind::ALL {
                let piece = Piece { color, kind };
                let value = Self::piece_value(kind);
                let mut bb = game_state.pieces[color.index()][kind.index()];
                while bb != 0 {
                    let sq = bb.trailing_zeros() as Square;
                    bb &= bb - 1;
                    score += sign * (value + Self::square_bonus(piece, sq));
                }
            }
        }

        score
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> Score {
        if !game_state.has_legal_move() {
            if game_state.is_check() {
                return match game_state.side_to_move {
                    Color::White => -MATE_SCORE,
                    Color::Black => MATE_SCORE,
                };
            }
            return 0;
        }
        if game_state.is_insufficient_material() {
            return 0;
        }

        Self::material_and_placement(game_state)
    }
}

/// Evaluate with the default scorer.
#[inline]
pub fn evaluate(game_state: &GameState) -> Score {
    PieceSquareScorer.score(game_state)
}
