//! Engine configuration.
//!
//! Configuration is layered: defaults, then an optional TOML file, then the
//! environment. A TOML file may set any subset of fields:
//!
//! ```toml
//! depth = 4
//!
//! [evaluator]
//! king_center_bonus = 2
//!
//! [evaluator.piece_values]
//! queen = 10
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::coretypes::{PlyKind, ScoreKind};
use crate::error;
use crate::evaluation::{Evaluator, EvaluatorConfig, PieceValues};
use crate::search::Searcher;

/// Environment variable that overrides the configured search depth.
pub const DEPTH_ENV: &str = "KIBITZ_DEPTH";

/// Parameters of the engine that are fixed for the length of a game.
///
/// Default values:
///
/// * `depth`: 3 plies
/// * `evaluator`: standard piece values, king-centralization bonus of 1
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub depth: PlyKind,
    pub evaluator: EvaluatorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(input: &str) -> error::Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> error::Result<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_depth_override(env::var(DEPTH_ENV).ok().as_deref())
    }

    fn apply_depth_override(mut self, value: Option<&str>) -> Self {
        match value.map(str::parse::<PlyKind>) {
            Some(Ok(depth)) => self.depth = depth,
            Some(Err(err)) => warn!(%err, "ignoring malformed {}", DEPTH_ENV),
            None => (),
        }
        self
    }

    /// Set the search depth in plies.
    pub fn depth(mut self, depth: PlyKind) -> Self {
        self.depth = depth;
        self
    }

    /// Replace the whole evaluator configuration.
    pub fn evaluator(mut self, evaluator: EvaluatorConfig) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn piece_values(mut self, piece_values: PieceValues) -> Self {
        self.evaluator.piece_values = piece_values;
        self
    }

    pub fn king_center_bonus(mut self, bonus: ScoreKind) -> Self {
        self.evaluator.king_center_bonus = bonus;
        self
    }

    /// Create a searcher using this configuration's evaluator.
    pub fn searcher(&self) -> Searcher {
        Searcher::new(Evaluator::new(self.evaluator))
    }
}
