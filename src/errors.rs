//! Error types returned across the crate.
//!
//! Input problems at the crate boundary (FEN text, move strings, PGN files,
//! configuration) are recoverable and reported through these enums. Rule
//! violations inside the engine itself (pushing a move that was never
//! generated as legal) are contract violations and are not represented here.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed Forsyth-Edwards Notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: u8 },

    #[error("invalid piece character '{0}' in board layout")]
    PieceChar(char),

    #[error("invalid side-to-move field '{0}'")]
    SideToMove(String),

    #[error("invalid castling field '{0}'")]
    Castling(String),

    #[error("invalid en-passant field '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),

    #[error("each side must have exactly one king")]
    KingCount,

    #[error("pawns cannot stand on the first or last rank")]
    PawnOnBackRank,
}

/// Rejected human move input.
///
/// Format errors (the text is not a coordinate move at all) are kept apart
/// from legality errors (the text parses but the move is not legal in the
/// current position).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveInputError {
    #[error("invalid move format: '{0}'")]
    InvalidMoveFormat(String),

    #[error("illegal move in this position: '{0}'")]
    IllegalMove(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search depth must not be negative, got {0}")]
    NegativeDepth(i32),
}

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("failed to read PGN file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed PGN tag line: {0}")]
    Tag(String),

    #[error("bad FEN tag: {0}")]
    Fen(#[from] FenError),

    #[error("game {game}: cannot play '{token}' at ply {ply}")]
    Move {
        game: usize,
        ply: usize,
        token: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game {0} not found")]
    GameNotFound(u64),

    #[error("game {0} is not active")]
    GameNotActive(u64),

    #[error(transparent)]
    MoveInput(#[from] MoveInputError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
