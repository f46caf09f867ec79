//! Search functions.

mod alpha_beta;
mod minimax;

pub use alpha_beta::*;
pub use minimax::*;

use std::fmt::{self, Display};
use std::time::Duration;

use crate::coretypes::{Color, PlyKind, Score};
use crate::error::Fault;

/// The results found from running a search on some root position.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// The best move to make for a position discovered from search.
    /// None if the root had no legal moves or the root search faulted.
    pub best_move: Option<M>,
    /// The score of making the best move, absolute (+White, -Black).
    pub score: Option<Score>,
    /// The player to move for the root position that was searched.
    pub player: Color,
    /// Depth in plies that was searched.
    pub depth: PlyKind,
    /// Total number of nodes visited in a search, root included.
    pub nodes: u64,
    /// Number of nodes where the window closed and remaining moves were skipped.
    pub cutoffs: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
    /// Every fault raised during the search, in the order they occurred.
    pub faults: Vec<Fault>,
}

impl<M> SearchResult<M> {
    /// True if any part of the search faulted, so the score may be approximate.
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Converts the score of the search into one that is relative to search's root player.
    pub fn relative_score(&self) -> Option<Score> {
        self.score.map(|score| score * self.player.sign())
    }

    /// Returns the color who is leading in the search of the root position, or None if level.
    pub fn leading(&self) -> Option<Color> {
        self.score.and_then(|score| score.leading())
    }

    /// Get average nodes per second of search.
    pub fn nps(&self) -> f64 {
        (self.nodes as f64 / self.elapsed.as_secs_f64()).round()
    }
}

impl<M: Display> Display for SearchResult<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let best_move = match &self.best_move {
            Some(best_move) => best_move.to_string(),
            None => "none".to_string(),
        };
        let score = match self.score {
            Some(score) => score.to_string(),
            None => "none".to_string(),
        };

        let mut displayed = String::new();
        displayed.push_str("SearchResult {\n");
        displayed.push_str(&format!("    best_move: {best_move}\n"));
        displayed.push_str(&format!("    abs_score: {score}\n"));
        displayed.push_str(&format!("    player   : {}\n", self.player));
        displayed.push_str(&format!("    depth    : {}\n", self.depth));
        displayed.push_str(&format!("    nodes    : {}\n", self.nodes));
        displayed.push_str(&format!("    cutoffs  : {}\n", self.cutoffs));
        displayed.push_str(&format!("    nps      : {}\n", self.nps()));
        displayed.push_str(&format!(
            "    elapsed  : {}.{:03}s\n",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        ));
        displayed.push_str(&format!("    faults   : {}\n", self.faults.len()));
        displayed.push_str("}\n");

        write!(f, "{displayed}")
    }
}
