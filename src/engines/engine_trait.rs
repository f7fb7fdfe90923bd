//! Engine abstraction layer used by game sessions and the console front end.
//!
//! Defines common input parameters and output payloads so callers can drive
//! any move-choosing strategy through a single trait interface.

use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::Score;

/// Per-request limits. `None` falls back to the engine's configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<i32>,
    pub nodes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// White-relative score of the chosen line.
    pub score: Score,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. The state must be returned unchanged.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError>;
}
