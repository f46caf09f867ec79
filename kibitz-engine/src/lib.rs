//! Kibitz Engine: a fixed-depth alpha-beta chess searcher with a material evaluator.
//!
//! The searcher and evaluator only talk to a game through the `RulesEngine`
//! trait. `Position` is the bundled rules engine for standard chess and
//! King of the Hill.

pub mod config;
pub mod coretypes;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod mailbox;
pub(crate) mod movegen;
pub mod perft;
pub mod position;
pub mod rules;
pub mod search;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{Error, Fault};
pub use evaluation::Evaluator;
pub use fen::Fen;
pub use position::{Outcome, Position, Variant};
pub use rules::RulesEngine;
pub use search::{SearchResult, Searcher};
