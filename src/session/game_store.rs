//! In-memory registry of running games.
//!
//! Each session owns its position, the moves played so far and a status that
//! flips to `Completed` as soon as the position is game-over.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{EngineError, SessionError};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::utils::pgn::write_pgn;
use crate::utils::uci_move::resolve_uci_move;

pub type GameId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: GameId,
    pub initial_state: GameState,
    pub state: GameState,
    pub history: Vec<Move>,
    pub status: GameStatus,
    /// PGN result token, set once the game is completed.
    pub result: Option<String>,
}

impl GameSession {
    fn new(id: GameId, initial_state: GameState) -> Self {
        let mut session = Self {
            id,
            state: initial_state.clone(),
            initial_state,
            history: Vec::new(),
            status: GameStatus::Active,
            result: None,
        };
        session.refresh_status();
        session
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// PGN text for the game so far; running games carry the `*` result.
    pub fn to_pgn(&self) -> String {
        write_pgn(
            &self.initial_state,
            &self.history,
            self.result.as_deref().unwrap_or("*"),
        )
    }

    fn play(&mut self, mv: Move) {
        self.state.push(mv);
        self.history.push(mv);
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        if let Some(outcome) = self.state.outcome() {
            info!("game {} completed: {outcome} ({})", self.id, outcome.result());
            self.status = GameStatus::Completed;
            self.result = Some(outcome.result().to_owned());
        }
    }
}

#[derive(Debug, Default)]
pub struct GameStore {
    games: BTreeMap<GameId, GameSession>,
    next_id: GameId,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game from `fen`, or from the standard position when `None`.
    pub fn create_game(&mut self, fen: Option<&str>) -> Result<GameId, SessionError> {
        let initial = match fen {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new_game(),
        };

        self.next_id += 1;
        let id = self.next_id;
        info!("game {id} created from {}", initial.to_fen());
        self.games.insert(id, GameSession::new(id, initial));
        Ok(id)
    }

    pub fn get(&self, id: GameId) -> Result<&GameSession, SessionError> {
        self.games.get(&id).ok_or(SessionError::GameNotFound(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Play a coordinate move such as `e2e4` or `e7e8q`.
    pub fn apply_move(&mut self, id: GameId, text: &str) -> Result<Move, SessionError> {
        let session = self.active_session(id)?;
        let mv = resolve_uci_move(&session.state, text)?;
        debug!("game {id}: {mv}");
        session.play(mv);
        Ok(mv)
    }

    /// Ask `engine` for a move in game `id` and play it.
    pub fn apply_engine_move(
        &mut self,
        id: GameId,
        engine: &mut impl Engine,
        params: &GoParams,
    ) -> Result<Move, SessionError> {
        let session = self.active_session(id)?;
        let output = engine.choose_move(&mut session.state, params)?;
        for line in &output.info_lines {
            debug!("game {id}: {} {line}", engine.name());
        }

        let mv = output
            .best_move
            .ok_or(SessionError::Engine(EngineError::GameOver))?;
        info!("game {id}: {} plays {mv}", engine.name());
        session.play(mv);
        Ok(mv)
    }

    fn active_session(&mut self, id: GameId) -> Result<&mut GameSession, SessionError> {
        let session = self
            .games
            .get_mut(&id)
            .ok_or(SessionError::GameNotFound(id))?;
        if !session.is_active() {
            return Err(SessionError::GameNotActive(id));
        }
        Ok(session)
    }
}
