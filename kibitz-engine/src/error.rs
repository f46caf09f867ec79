//! Kibitz Engine error and fault types.
//!
//! `Error` is returned by the fallible plumbing around the engine: parsing
//! FEN strings and moves, applying human input, loading configuration.
//!
//! `Fault` is never returned by the search or the evaluator. Those degrade to a
//! neutral result instead, and report faults through a side channel so that a
//! caller can tell a balanced position apart from a failed search.

use std::io;
use std::result;

use thiserror::Error;

use crate::coretypes::Color;

/// Kibitz Engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// The primary and general error type for the Kibitz Engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("parse square malformed: {0:?}")]
    ParseSquareMalformed(String),
    #[error("parse color malformed: {0:?}")]
    ParseColorMalformed(String),
    #[error("parse piece malformed: {0:?}")]
    ParsePieceMalformed(char),
    #[error("parse castling malformed: {0:?}")]
    ParseCastlingMalformed(String),
    #[error("parse move malformed: {0:?}")]
    ParseMoveMalformed(String),
    #[error("fen: {0}")]
    Fen(String),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("config io: {0}")]
    ConfigIo(#[from] io::Error),
    #[error("config parse: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Errors reported by a rules engine while mutating a position.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RulesError {
    /// The move cannot be applied to the current position.
    #[error("illegal move {0}")]
    IllegalMove(String),
    /// `undo` was called with no applied move left to revert.
    #[error("no move to undo")]
    NothingToUndo,
}

/// Faults raised while statically scoring a position.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EvaluationFault {
    #[error("{0} king is missing from the board")]
    MissingKing(Color),
    #[error("material sum overflowed")]
    ScoreOverflow,
}

/// A non-fatal event observed during evaluation or search.
///
/// The faulting node still produces a neutral score, so faults are collected
/// rather than returned.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Fault {
    #[error("evaluation fault: {0}")]
    Evaluation(#[from] EvaluationFault),
    #[error("search fault: {0}")]
    Search(#[from] RulesError),
    /// The rules engine produced no legal moves for a position it does not consider over.
    #[error("rules engine contract violation: no legal moves in a live position")]
    NoMovesInLivePosition,
}
