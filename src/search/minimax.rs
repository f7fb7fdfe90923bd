//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The search walks the game tree depth-first on a single `GameState`,
//! pushing and popping moves in place, so the position is back to its
//! starting state whenever a search returns. Moves are tried in generation
//! order and the first move reaching the extremum wins ties.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::SearchError;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer, Score, SCORE_INFINITY};

pub const DEFAULT_DEPTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub depth: i32,
    /// Stop expanding once this many nodes have been visited.
    pub node_budget: Option<u64>,
    /// Disable to get a plain minimax traversal.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            node_budget: None,
            pruning: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` at depth 0 and at terminal positions.
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    /// The node budget ran out and the result comes from a partial tree.
    pub aborted: bool,
}

pub struct Searcher<S: BoardScorer = PieceSquareScorer> {
    scorer: S,
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher<PieceSquareScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(PieceSquareScorer, config)
    }
}

impl Default for Searcher<PieceSquareScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> Searcher<S> {
    pub fn with_scorer(scorer: S, config: SearchConfig) -> Self {
        Self {
            scorer,
            config,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search from the side to move with a full window at the configured depth.
    pub fn best_move(&mut self, game_state: &mut GameState) -> Result<SearchResult, SearchError> {
        let maximizing = game_state.side_to_move() == Color::White;
        self.search(
            game_state,
            self.config.depth,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            maximizing,
        )
    }

    /// Minimax value of `game_state` searched `depth` plies deep inside the
    /// `(alpha, beta)` window.
    pub fn search(
        &mut self,
        game_state: &mut GameState,
        depth: i32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<SearchResult, SearchError> {
        if depth < 0 {
            return Err(SearchError::NegativeDepth(depth));
        }

        self.stats = SearchStats::default();
        let start_ply = game_state.ply_depth();

        let mut result = self.alphabeta(game_state, depth, alpha, beta, maximizing);

        debug_assert_eq!(
            game_state.ply_depth(),
            start_ply,
            "search must leave the move stack as it found it"
        );

        if self.stats.aborted {
            warn!(
                "node budget of {:?} exhausted after {} nodes at depth {depth}",
                self.config.node_budget, self.stats.nodes
            );
            if result.best_move.is_none() {
                result.best_move = game_state.legal_moves().first().copied();
                result.score = self.scorer.score(game_state);
            }
        }

        debug!(
            "search depth={depth} score={} best={:?} nodes={} cutoffs={}",
            result.score, result.best_move, self.stats.nodes, self.stats.cutoffs
        );

        Ok(result)
    }

    fn alphabeta(
        &mut self,
        game_state: &mut GameState,
        depth: i32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;

        if depth == 0 || game_state.is_game_over() {
            return SearchResult {
                score: self.scorer.score(game_state),
                best_move: None,
            };
        }

        let mut best_score = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
        let mut best_move = None;

        for mv in game_state.legal_moves() {
            if self.budget_exhausted() {
                self.stats.aborted = true;
                break;
            }

            game_state.push(mv);
            let child = self.alphabeta(game_state, depth - 1, alpha, beta, !maximizing);
            game_state.pop();

            // The interrupted subtree's value is not trustworthy.
            if self.stats.aborted {
                break;
            }

            if maximizing {
                if child.score > best_score {
                    best_score = child.score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(child.score);
            } else {
                if child.score < best_score {
                    best_score = child.score;
                    best_move = Some(mv);
                }
                beta = beta.min(child.score);
            }

            if self.config.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        SearchResult {
            score: best_score,
            best_move,
        }
    }

    #[inline]
    fn budget_exhausted(&self) -> bool {
        self.config
            .node_budget
            .is_some_and(|budget| self.stats.nodes >= budget)
    }
}

/// One-shot search with the default evaluator.
pub fn search(
    game_state: &mut GameState,
    depth: i32,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> Result<SearchResult, SearchError> {
    Searcher::new(SearchConfig::default()).search(game_state, depth, alpha, beta, maximizing)
}

/// Best move for the side to move at `depth` plies with the default
/// evaluator. `DEFAULT_DEPTH` is the usual choice.
pub fn best_move(game_state: &mut GameState, depth: i32) -> Result<SearchResult, SearchError> {
    Searcher::new(SearchConfig {
        depth,
        ..SearchConfig::default()
    })
    .best_move(game_state)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::search::board_scoring::{evaluate, MATE_SCORE};

    // Quiet openings, tactical middlegames and endgames, both sides to move.
    const POSITIONS: [&str; 22] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "rnbqkbnr/ppp2ppp/8/3pp3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq d6 0 3",
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5",
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
        "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
        "r5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1",
        "8/8/8/4k3/8/8/4P3/4K3 w - - 0 1",
        "8/8/8/4k3/8/8/4P3/4K3 b - - 0 1",
        "8/5k2/8/8/8/8/1R6/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/3q4/4K3 w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        "7k/8/6K1/5Q2/8/8/8/8 w - - 0 1",
        "4k3/4p3/8/8/8/8/8/3QK3 b - - 0 1",
        "2kr4/ppp5/8/8/8/8/5PPP/3R2K1 w - - 0 1",
        "r1b1k2r/ppppnppp/2n2q2/2b5/3NP3/2P1B3/PP3PPP/RN1QKB1R w KQkq - 0 7",
        "8/3p4/3k4/8/2N5/8/3K4/8 w - - 0 1",
    ];

    const ENDGAMES: [&str; 6] = [
        "8/8/8/4k3/8/8/4P3/4K3 w - - 0 1",
        "8/5k2/8/8/8/8/1R6/4K3 w - - 0 1",
        "7k/8/6K1/5Q2/8/8/8/8 w - - 0 1",
        "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "8/3p4/3k4/8/2N5/8/3K4/8 w - - 0 1",
    ];

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn search_with(game: &mut GameState, depth: i32, pruning: bool) -> (SearchResult, SearchStats) {
        let mut searcher = Searcher::new(SearchConfig {
            depth,
            node_budget: None,
            pruning,
        });
        let result = searcher.best_move(game).expect("search should run");
        (result, searcher.stats())
    }

    #[test]
    fn same_position_same_answer() {
        for fen in POSITIONS.iter().take(6) {
            let mut game = state(fen);
            let first = best_move(&mut game, 2).expect("search should run");
            let second = best_move(&mut game, 2).expect("search should run");
            assert_eq!(first, second, "{fen}");
        }
    }

    #[test]
    fn search_leaves_the_position_untouched() {
        for fen in ENDGAMES.iter().chain(POSITIONS.iter().take(3)) {
            let max_depth = if ENDGAMES.contains(fen) { 4 } else { 3 };
            for depth in 0..=max_depth {
                let mut game = state(fen);
                let before = game.clone();
                best_move(&mut game, depth).expect("search should run");
                assert_eq!(game, before, "{fen} at depth {depth}");
            }
        }
    }

    #[test]
    fn played_moves_before_search_are_preserved() {
        let mut game = GameState::new_game();
        for uci in ["e2e4", "e7e5"] {
            let mv = game
                .legal_moves()
                .into_iter()
                .find(|m| m.to_uci() == uci)
                .expect("opening move should be legal");
            game.push(mv);
        }
        let before = game.clone();
        best_move(&mut game, 2).expect("search should run");
        assert_eq!(game, before);
        assert_eq!(game.ply_depth(), 2);
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        for fen in POSITIONS {
            let mut game = state(fen);
            let mut searcher = Searcher::new(SearchConfig::default());
            let result = searcher
                .search(&mut game, 0, -SCORE_INFINITY, SCORE_INFINITY, true)
                .expect("search should run");
            assert_eq!(result.score, evaluate(&game), "{fen}");
            assert_eq!(result.best_move, None);
            assert_eq!(searcher.stats().nodes, 1);
        }
    }

    #[test]
    fn terminal_positions_return_their_score_without_a_move() {
        for (fen, expected) in [
            ("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3", -MATE_SCORE),
            ("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1", MATE_SCORE),
            ("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 0),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", 0),
        ] {
            let mut game = state(fen);
            for depth in 1..=3 {
                let result = best_move(&mut game, depth).expect("search should run");
                assert_eq!(result.score, expected, "{fen}");
                assert_eq!(result.best_move, None, "{fen}");
            }
        }
    }

    #[test]
    fn pruning_never_changes_the_answer() {
        for fen in POSITIONS {
            for depth in 1..=3 {
                let mut game = state(fen);
                let (pruned, pruned_stats) = search_with(&mut game, depth, true);
                let (full, full_stats) = search_with(&mut game, depth, false);
                assert_eq!(pruned, full, "{fen} at depth {depth}");
                assert_eq!(full_stats.cutoffs, 0);
                assert!(pruned_stats.nodes <= full_stats.nodes);
            }
        }
        for fen in ENDGAMES {
            let mut game = state(fen);
            let (pruned, _) = search_with(&mut game, 4, true);
            let (full, _) = search_with(&mut game, 4, false);
            assert_eq!(pruned, full, "{fen} at depth 4");
        }
    }

    #[test]
    fn pruning_matches_full_search_along_random_games() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _game in 0..6 {
            let mut game = GameState::new_game();
            for ply in 0..40 {
                if ply % 8 == 7 {
                    let before = game.clone();
                    let (pruned, _) = search_with(&mut game, 2, true);
                    let (full, _) = search_with(&mut game, 2, false);
                    assert_eq!(pruned, full, "{}", game.to_fen());
                    assert_eq!(game, before);
                }
                let moves = game.legal_moves();
                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };
                game.push(mv);
                if game.is_game_over() {
                    break;
                }
            }
        }
    }

    #[test]
    fn returned_moves_are_legal() {
        for fen in POSITIONS {
            let mut game = state(fen);
            let result = best_move(&mut game, 2).expect("search should run");
            let mv = result.best_move.expect("live position should yield a move");
            assert!(game.legal_moves().contains(&mv), "{fen}: {mv}");
        }
    }

    #[test]
    fn start_position_depth_three() {
        let mut game = GameState::new_game();
        let first = best_move(&mut game, DEFAULT_DEPTH).expect("search should run");
        let mv = first.best_move.expect("start position has moves");
        assert!(game.legal_moves().contains(&mv));
        assert!(first.score.abs() < 200, "score {}", first.score);
        assert_eq!(best_move(&mut game, DEFAULT_DEPTH).expect("search should run"), first);
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let mut game = state("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        for depth in [1, 3] {
            let result = best_move(&mut game, depth).expect("search should run");
            assert_eq!(result.score, MATE_SCORE);
            assert_eq!(result.best_move.map(|m| m.to_uci()).as_deref(), Some("a1a8"));
        }

        let mut game = state("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
        let result = best_move(&mut game, 1).expect("search should run");
        assert_eq!(result.score, -MATE_SCORE);
        assert_eq!(result.best_move.map(|m| m.to_uci()).as_deref(), Some("a8a1"));
    }

    #[test]
    fn first_move_wins_ties() {
        // Without pawns or knights on the board no quiet move changes the score.
        let mut game = state("8/8/3k4/8/8/8/8/K6R w - - 0 1");
        let result = best_move(&mut game, 1).expect("search should run");
        assert_eq!(result.best_move, game.legal_moves().first().copied());
    }

    #[test]
    fn negative_depth_is_rejected() {
        let mut game = GameState::new_game();
        assert_eq!(best_move(&mut game, -1), Err(SearchError::NegativeDepth(-1)));
        assert_eq!(
            search(&mut game, -3, -SCORE_INFINITY, SCORE_INFINITY, true),
            Err(SearchError::NegativeDepth(-3))
        );
    }

    #[test]
    fn node_budget_falls_back_to_a_legal_move() {
        let mut game = GameState::new_game();
        let before = game.clone();

        let mut searcher = Searcher::new(SearchConfig {
            depth: 3,
            node_budget: Some(1),
            pruning: true,
        });
        let result = searcher.best_move(&mut game).expect("search should run");
        assert!(searcher.stats().aborted);
        assert_eq!(result.best_move, game.legal_moves().first().copied());

        searcher.config_mut().node_budget = Some(200);
        let result = searcher.best_move(&mut game).expect("search should run");
        assert!(searcher.stats().aborted);
        assert!(searcher.stats().nodes <= 200);
        let mv = result.best_move.expect("fallback move");
        assert!(game.legal_moves().contains(&mv));
        assert_eq!(game, before);
    }

    #[test]
    fn generous_budget_matches_unbounded_search() {
        let mut game = state(POSITIONS[2]);
        let unbounded = best_move(&mut game, 2).expect("search should run");

        let mut searcher = Searcher::new(SearchConfig {
            depth: 2,
            node_budget: Some(1_000_000),
            pruning: true,
        });
        let bounded = searcher.best_move(&mut game).expect("search should run");
        assert!(!searcher.stats().aborted);
        assert_eq!(bounded, unbounded);
    }

    #[test]
    fn config_reads_partial_toml() {
        let config: SearchConfig = toml::from_str("depth = 5").expect("config should parse");
        assert_eq!(
            config,
            SearchConfig {
                depth: 5,
                node_budget: None,
                pruning: true,
            }
        );
    }
}
