//! Core incremental board state representation.
//!
//! `GameState` is the position model the search engine runs on. It stores
//! piece bitboards, occupancy caches, turn and rights flags, clocks, and the
//! history stacks used by `push` / `pop`. Legal move generation lives in
//! `move_generation`, terminal predicates in `game_state::outcome`.

use crate::errors::FenError;
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Incremental game state optimised for in-place make/unmake.
///
/// Two states compare equal only if board, rights, clocks and both history
/// stacks match, which makes `==` a full-state comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,
    /// Keys of every position reached so far, current one last.
    pub key_history: Vec<u64>,
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
            key_history: Vec::new(),
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board, White to move. Mostly useful for building test positions.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        const WHITE: [u64; 6] = [
            0x0000_0000_0000_FF00,
            0x0000_0000_0000_0042,
            0x0000_0000_0000_0024,
            0x0000_0000_0000_0081,
            0x0000_0000_0000_0008,
            0x0000_0000_0000_0010,
        ];
        const BLACK: [u64; 6] = [
            0x00FF_0000_0000_0000,
            0x4200_0000_0000_0000,
            0x2400_0000_0000_0000,
            0x8100_0000_0000_0000,
            0x0800_0000_0000_0000,
            0x1000_0000_0000_0000,
        ];

        let mut game_state = Self {
            pieces: [WHITE, BLACK],
            castling_rights: CASTLE_WHITE_KINGSIDE
                | CASTLE_WHITE_QUEENSIDE
                | CASTLE_BLACK_KINGSIDE
                | CASTLE_BLACK_QUEENSIDE,
            ..Self::default()
        };
        game_state.refresh_derived();
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square_bit(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in Color::ALL {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece { color, kind });
                }
            }
        }
        None
    }

    /// Number of moves currently recorded on the undo stack.
    #[inline]
    pub fn ply_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Place a piece on an empty square and refresh derived fields.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.pieces[piece.color.index()][piece.kind.index()] |= square_bit(square);
        self.refresh_derived();
    }

    /// Recompute occupancy caches and the Zobrist key from the bitboards and
    /// reset the repetition history to the current position.
    pub(crate) fn refresh_derived(&mut self) {
        self.recalc_occupancy();
        self.zobrist_key = compute_zobrist_key(self);
        self.key_history.clear();
        self.key_history.push(self.zobrist_key);
    }

    #[inline]
    pub(crate) fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}
