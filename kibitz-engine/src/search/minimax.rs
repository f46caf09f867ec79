//! Minimax implementation.
//!
//! A plain, unpruned search over the same tree `Searcher` walks. It exists to
//! check alpha-beta results against, so it propagates faults instead of
//! containing them.

use std::cmp;

use crate::coretypes::{Color, PlyKind, Score};
use crate::error::Fault;
use crate::evaluation::Evaluator;
use crate::rules::RulesEngine;

/// Base minimax call. Returns the score of the side to move's best move and
/// the move itself, or None if the position has no legal moves.
///
/// Root moves are compared strictly, so the first of several equally scored
/// moves is returned. A depth of 0 is searched as 1.
pub fn minimax<R: RulesEngine>(
    position: &mut R,
    evaluator: &Evaluator,
    ply: PlyKind,
) -> Result<(Score, Option<R::Move>), Fault> {
    let ply = cmp::max(ply, 1);
    let maximizing = position.side_to_move() == Color::White;
    let mut best: Option<(Score, R::Move)> = None;

    for legal_move in position.legal_moves() {
        position.apply(legal_move)?;
        let move_score = minimax_impl(position, evaluator, ply - 1, !maximizing);
        position.undo()?;
        let move_score = move_score?;

        let improves = match best {
            None => true,
            Some((best_score, _)) if maximizing => move_score > best_score,
            Some((best_score, _)) => move_score < best_score,
        };
        if improves {
            best = Some((move_score, legal_move));
        }
    }

    Ok(match best {
        Some((score, best_move)) => (score, Some(best_move)),
        None => (evaluator.try_evaluate(position)?, None),
    })
}

fn minimax_impl<R: RulesEngine>(
    position: &mut R,
    evaluator: &Evaluator,
    ply: PlyKind,
    maximizing: bool,
) -> Result<Score, Fault> {
    // Stop at terminal node: game over or last depth.
    if ply == 0 || position.is_game_over() {
        return Ok(evaluator.try_evaluate(position)?);
    }

    let legal_moves = position.legal_moves();
    if legal_moves.is_empty() {
        return Err(Fault::NoMovesInLivePosition);
    }

    let mut best_score = match maximizing {
        true => Score::MIN,
        false => Score::MAX,
    };

    for legal_move in legal_moves {
        position.apply(legal_move)?;
        let move_score = minimax_impl(position, evaluator, ply - 1, !maximizing);
        position.undo()?;
        let move_score = move_score?;

        best_score = match maximizing {
            true => cmp::max(best_score, move_score),
            false => cmp::min(best_score, move_score),
        };
    }

    Ok(best_score)
}
