//! Crate root module declarations for the alpha-beta chess engine.
//!
//! This file exposes the position model, move generation, search, engine
//! front, game sessions and notation helpers so the binary, benches and
//! external tooling can import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod outcome;
    pub mod undo_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod attacks;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod make_unmake;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}
pub mod tables {
    pub mod piece_square;
}
pub mod engines {
    pub mod engine_minimax;
    pub mod engine_trait;
}
pub mod session {
    pub mod game_store;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
    pub mod uci_move;
}
