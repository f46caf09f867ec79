//! Engine struct acts as a simplified API for playing a game against the Kibitz engine.

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::coretypes::{Move, PlyKind, Score};
use crate::error;
use crate::position::{Outcome, Position};
use crate::search::{SearchResult, Searcher};

/// EngineBuilder allows for parameters of an Engine to be set and built once.
///
/// Default values:
///
/// * `position`: Starting chess position
/// * `config`: `EngineConfig::default()`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    position: Position,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            position: Position::start_position(),
            config: EngineConfig::default(),
        }
    }

    /// Create and return a new Engine.
    pub fn build(&self) -> Engine {
        Engine {
            start: self.position.clone(),
            position: self.position.clone(),
            searcher: self.config.searcher(),
            depth: self.config.depth,
        }
    }

    /// Set the Engine's initial position.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the engine's search depth and evaluator.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine holds a game in progress along with the searcher that plays it.
/// It is stateful because moves are applied to and undone from the game
/// position, so the engine remembers the whole line played so far.
#[derive(Debug, Clone)]
pub struct Engine {
    start: Position,
    position: Position,
    searcher: Searcher,
    depth: PlyKind,
}

impl Engine {
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Returns reference to current position of engine.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn depth(&self) -> PlyKind {
        self.depth
    }

    /// Start a new game from the position this engine was built with.
    pub fn new_game(&mut self) {
        info!("new game");
        self.position = self.start.clone();
    }

    /// Search the current position without changing it.
    pub fn search(&mut self) -> SearchResult<Move> {
        self.searcher.analyze(&mut self.position, self.depth)
    }

    /// Search the current position and play the best move found.
    /// The returned result has no best move if the engine could not move.
    pub fn play_engine_move(&mut self) -> error::Result<SearchResult<Move>> {
        let result = self.search();
        if let Some(best_move) = result.best_move {
            self.position.do_legal_move(best_move)?;
            debug!(%best_move, "engine played");
        }
        Ok(result)
    }

    /// Play a move on behalf of the human player, if it is legal.
    pub fn play_human_move(&mut self, move_: Move) -> error::Result<()> {
        self.position.do_legal_move(move_)?;
        debug!(%move_, "human played");
        Ok(())
    }

    /// Take back the last move played.
    pub fn undo(&mut self) -> error::Result<Move> {
        Ok(self.position.undo_move()?)
    }

    /// Static evaluation of the current position.
    pub fn evaluate(&self) -> Score {
        self.searcher.evaluator().evaluate(&self.position)
    }

    /// The result of the game, if it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
