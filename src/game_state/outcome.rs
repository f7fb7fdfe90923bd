//! Terminal-position predicates and game outcome.
//!
//! Only automatic endings are reported. Claimable draws (fifty-move rule,
//! threefold repetition) never end the game on their own.

use std::fmt;

use crate::game_state::chess_rules::{
    DARK_SQUARES, FIVEFOLD_REPETITION_COUNT, LIGHT_SQUARES, SEVENTY_FIVE_MOVE_HALFMOVES,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    #[inline]
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN result token.
    pub fn result(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner:?} wins"),
            Outcome::Stalemate => f.write_str("stalemate"),
            Outcome::InsufficientMaterial => f.write_str("draw by insufficient material"),
            Outcome::SeventyFiveMoves => f.write_str("draw by the seventy-five-move rule"),
            Outcome::FivefoldRepetition => f.write_str("draw by fivefold repetition"),
        }
    }
}

impl GameState {
    /// Whether the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    /// Neither side has mating material left.
    pub fn is_insufficient_material(&self) -> bool {
        Color::ALL
            .into_iter()
            .all(|color| self.has_insufficient_material(color))
    }

    /// Whether `color` can no longer deliver mate by any sequence of moves.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let own = self.occupancy_by_color[color.index()];
        let their = self.occupancy_by_color[color.opposite().index()];
        let all_of = |kind: PieceKind| {
            self.pieces[0][kind.index()] | self.pieces[1][kind.index()]
        };

        if own & (all_of(PieceKind::Pawn) | all_of(PieceKind::Rook) | all_of(PieceKind::Queen))
            != 0
        {
            return false;
        }

        // A lone knight can still mate a king boxed in by its own pieces,
        // unless those pieces are only queens.
        if own & all_of(PieceKind::Knight) != 0 {
            let blockers = their & !all_of(PieceKind::King) & !all_of(PieceKind::Queen);
            return own.count_ones() <= 2 && blockers == 0;
        }

        if own & all_of(PieceKind::Bishop) != 0 {
            let bishops = all_of(PieceKind::Bishop);
            let same_colour = bishops & DARK_SQUARES == 0 || bishops & LIGHT_SQUARES == 0;
            return same_colour
                && all_of(PieceKind::Pawn) == 0
                && all_of(PieceKind::Knight) == 0;
        }

        true
    }

    #[inline]
    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_HALFMOVES && self.has_legal_move()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.key_history
            .iter()
            .filter(|&&key| key == self.zobrist_key)
            .count()
            >= FIVEFOLD_REPETITION_COUNT
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// How the game ended, or `None` while it is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        let can_move = self.has_legal_move();
        if !can_move && self.is_check() {
            return Some(Outcome::Checkmate {
                winner: self.side_to_move.opposite(),
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if !can_move {
            return Some(Outcome::Stalemate);
        }
        if self.halfmove_clock >= SEVENTY_FIVE_MOVE_HALFMOVES {
            return Some(Outcome::SeventyFiveMoves);
        }
        if self.is_fivefold_repetition() {
            return Some(Outcome::FivefoldRepetition);
        }
        None
    }
}
