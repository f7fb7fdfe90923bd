//! Engine front for the fixed-depth alpha-beta searcher.

use log::info;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::search::minimax::{SearchConfig, Searcher};

pub struct MinimaxEngine {
    base_config: SearchConfig,
    searcher: Searcher,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            base_config: config,
            searcher: Searcher::new(config),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.base_config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax alpha-beta"
    }

    fn new_game(&mut self) {
        info!("{}: new game, depth {}", self.name(), self.base_config.depth);
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError> {
        if game_state.is_game_over() {
            return Err(EngineError::GameOver);
        }

        let config = SearchConfig {
            depth: params.depth.unwrap_or(self.base_config.depth),
            node_budget: params.nodes.or(self.base_config.node_budget),
            pruning: self.base_config.pruning,
        };
        *self.searcher.config_mut() = config;

        let result = self.searcher.best_move(game_state)?;
        let stats = self.searcher.stats();

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: result.score,
            nodes: stats.nodes,
            info_lines: Vec::new(),
        };
        let pv = result
            .best_move
            .map(|mv| format!(" pv {mv}"))
            .unwrap_or_default();
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {}{pv}",
            config.depth, result.score, stats.nodes
        ));
        if stats.aborted {
            out.info_lines
                .push("info string node budget exhausted, partial result".to_owned());
        }

        Ok(out)
    }
}
