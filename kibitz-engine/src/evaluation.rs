//! Static Evaluation.
//!
//! Every score produced here is absolute: White is the maxing player and Black
//! the minning player, so +3 is good for White and -3 is good for Black, no
//! matter whose turn it is.

use serde::Deserialize;
use tracing::warn;

use crate::coretypes::{Color, PieceKind, Score, ScoreKind, Square};
use crate::error::EvaluationFault;
use crate::rules::RulesEngine;

/// Material value of each kind of piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: ScoreKind,
    pub knight: ScoreKind,
    pub bishop: ScoreKind,
    pub rook: ScoreKind,
    pub queen: ScoreKind,
    /// Kings are always on the board, so they usually carry no material value.
    pub king: ScoreKind,
}

impl PieceValues {
    /// Classic 1/3/3/5/9 piece values.
    pub const STANDARD: PieceValues = PieceValues {
        pawn: 1,
        knight: 3,
        bishop: 3,
        rook: 5,
        queen: 9,
        king: 0,
    };

    pub const fn value(&self, piece_kind: PieceKind) -> Score {
        Score(match piece_kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        })
    }
}

impl Default for PieceValues {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Tunable parameters of the evaluator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub piece_values: PieceValues,
    /// Bonus for White's king on d4, e4, d5 or e5 once the variant has ended the game.
    pub king_center_bonus: ScoreKind,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            piece_values: PieceValues::STANDARD,
            king_center_bonus: 1,
        }
    }
}

/// Material evaluator with a king-centralization term for variant endings.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Statically evaluate a position. Never fails: a position that cannot be
    /// scored is reported with a warning and scores as level.
    pub fn evaluate<R: RulesEngine>(&self, position: &R) -> Score {
        self.try_evaluate(position).unwrap_or_else(|fault| {
            warn!(%fault, "evaluation fault, scoring position as level");
            Score::ZERO
        })
    }

    /// Statically evaluate a position, returning the fault if it cannot be scored.
    ///
    /// The king-centralization term only applies when the rules engine reports
    /// that a variant rule drew or ended the game.
    pub fn try_evaluate<R: RulesEngine>(&self, position: &R) -> Result<Score, EvaluationFault> {
        let material = self.material(position)?;

        if position.is_variant_draw() || position.is_variant_end() {
            let bonus = self.king_centralization(position)?;
            return material
                .checked_add(bonus)
                .ok_or(EvaluationFault::ScoreOverflow);
        }
        Ok(material)
    }

    /// Sum of White's piece values minus the sum of Black's.
    pub fn material<R: RulesEngine>(&self, position: &R) -> Result<Score, EvaluationFault> {
        Square::ALL
            .into_iter()
            .filter_map(|square| position.piece_at(square))
            .try_fold(Score::ZERO, |total, piece| {
                let value = self.config.piece_values.value(piece.piece_kind());
                let total = match piece.color() {
                    Color::White => total.checked_add(value),
                    Color::Black => total.checked_sub(value),
                };
                total.ok_or(EvaluationFault::ScoreOverflow)
            })
    }

    /// Bonus for White's king standing on one of the four central squares.
    pub fn king_centralization<R: RulesEngine>(
        &self,
        position: &R,
    ) -> Result<Score, EvaluationFault> {
        let king = position
            .king_square(Color::White)
            .ok_or(EvaluationFault::MissingKing(Color::White))?;

        Ok(match king.is_center() {
            true => Score(self.config.king_center_bonus),
            false => Score::ZERO,
        })
    }
}
