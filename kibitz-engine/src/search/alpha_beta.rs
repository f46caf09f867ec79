//! Minimax with Alpha-Beta pruning implementation.

use std::cmp;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::coretypes::{Color, PlyKind, Score};
use crate::error::Fault;
use crate::evaluation::Evaluator;
use crate::rules::RulesEngine;
use crate::search::SearchResult;

/// Properties of Alpha-Beta pruning.
/// * The maxing player can only update alpha from its children.
/// * The minning player can only update beta from its children.
/// * Alpha and Beta can only be inherited from their ancestors, and are otherwise Alpha=-Inf, Beta=Inf.
/// * Alpha is usually less than Beta. When they are equal or cross, a cut off occurs.
///
/// The searcher never lets a fault escape. A node that faults scores as level,
/// a root that faults yields no move, and every fault is logged and kept in a
/// side channel readable through `faults` or the returned `SearchResult`.
/// A failed undo leaves the position out of step with the tree, so it stops
/// the whole search: no further move is applied or undone and no move is chosen.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    evaluator: Evaluator,
    faults: Vec<Fault>,
    nodes: u64,
    cutoffs: u64,
    unwinding: bool,
}

impl Searcher {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            faults: Vec::new(),
            nodes: 0,
            cutoffs: 0,
            unwinding: false,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Faults raised since the last top-level search started.
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Returns the best move for the side to move, or None if there is no legal
    /// move or the search failed.
    pub fn get_best_move<R: RulesEngine>(
        &mut self,
        position: &mut R,
        depth: PlyKind,
    ) -> Option<R::Move> {
        self.analyze(position, depth).best_move
    }

    /// Search the position to a fixed depth and report the best move with its
    /// score, search statistics and any faults met along the way.
    ///
    /// The position is left exactly as it was passed in.
    pub fn analyze<R: RulesEngine>(&mut self, position: &mut R, depth: PlyKind) -> SearchResult<R::Move> {
        self.faults.clear();
        self.nodes = 0;
        self.cutoffs = 0;
        self.unwinding = false;

        let player = position.side_to_move();
        let depth = cmp::max(depth, 1);
        let instant = Instant::now();

        let (best_move, score) = match self.root(position, depth, player) {
            Ok(Some((best_move, score))) => (Some(best_move), Some(score)),
            Ok(None) => (None, None),
            Err(fault) => {
                warn!(%fault, "root search fault, no move selected");
                self.faults.push(fault);
                (None, None)
            }
        };

        let result = SearchResult {
            best_move,
            score,
            player,
            depth,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
            elapsed: instant.elapsed(),
            faults: self.faults.clone(),
        };
        debug!(
            best_move = ?result.best_move,
            score = ?result.score,
            nodes = result.nodes,
            faults = result.faults.len(),
            "search complete"
        );
        result
    }

    /// Root of the search. Each root move is searched with a full window, and a
    /// move replaces the current best only if it is strictly better for the
    /// root player, so the first of several equal moves is kept.
    fn root<R: RulesEngine>(
        &mut self,
        position: &mut R,
        depth: PlyKind,
        player: Color,
    ) -> Result<Option<(R::Move, Score)>, Fault> {
        self.nodes += 1;
        let maximizing = player == Color::White;
        let mut best: Option<(R::Move, Score)> = None;

        for legal_move in position.legal_moves() {
            position.apply(legal_move)?;
            let move_score =
                self.search_node(position, depth - 1, Score::MIN, Score::MAX, !maximizing);
            if self.unwinding {
                warn!(%legal_move, "search abandoned below root move, no move selected");
                return Ok(None);
            }
            self.undo(position)?;
            trace!(%legal_move, score = %move_score, "root move");

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => move_score > best_score,
                Some((_, best_score)) => move_score < best_score,
            };
            if improves {
                best = Some((legal_move, move_score));
            }
        }

        Ok(best)
    }

    /// Alpha-beta search of a position, returning its absolute score.
    ///
    /// A fault anywhere in this node is logged, recorded, and scored as level.
    /// Faults in children are contained by the children themselves, so every
    /// applied move is undone unless an undo itself fails.
    pub fn search<R: RulesEngine>(
        &mut self,
        position: &mut R,
        depth: PlyKind,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Score {
        self.unwinding = false;
        self.search_node(position, depth, alpha, beta, maximizing)
    }

    fn search_node<R: RulesEngine>(
        &mut self,
        position: &mut R,
        depth: PlyKind,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Score {
        match self.search_impl(position, depth, alpha, beta, maximizing) {
            Ok(score) => score,
            Err(fault) => {
                warn!(%fault, depth, "search fault, scoring node as level");
                self.faults.push(fault);
                Score::ZERO
            }
        }
    }

    fn search_impl<R: RulesEngine>(
        &mut self,
        position: &mut R,
        depth: PlyKind,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Score, Fault> {
        self.nodes += 1;

        // Stop at terminal node: last depth or game over.
        if depth == 0 || position.is_game_over() {
            return Ok(self.leaf(position));
        }

        let legal_moves = position.legal_moves();
        if legal_moves.is_empty() {
            let fault = Fault::NoMovesInLivePosition;
            warn!(%fault, "treating node as terminal");
            self.faults.push(fault);
            return Ok(self.leaf(position));
        }

        if maximizing {
            let mut best_score = Score::MIN;

            for legal_move in legal_moves {
                position.apply(legal_move)?;
                let move_score = self.search_node(position, depth - 1, alpha, beta, false);
                if self.unwinding {
                    return Ok(best_score);
                }
                self.undo(position)?;

                best_score = cmp::max(best_score, move_score);
                alpha = cmp::max(alpha, best_score);
                if beta <= alpha {
                    // Beta cutoff
                    self.cutoffs += 1;
                    break;
                }
            }
            Ok(best_score)
        } else {
            let mut best_score = Score::MAX;

            for legal_move in legal_moves {
                position.apply(legal_move)?;
                let move_score = self.search_node(position, depth - 1, alpha, beta, true);
                if self.unwinding {
                    return Ok(best_score);
                }
                self.undo(position)?;

                best_score = cmp::min(best_score, move_score);
                beta = cmp::min(beta, best_score);
                if beta <= alpha {
                    // Alpha cutoff
                    self.cutoffs += 1;
                    break;
                }
            }
            Ok(best_score)
        }
    }

    /// Undo the last applied move, unwinding the whole search if that fails.
    fn undo<R: RulesEngine>(&mut self, position: &mut R) -> Result<(), Fault> {
        position.undo().map_err(|error| {
            self.unwinding = true;
            Fault::from(error)
        })
    }

    /// Static evaluation of a leaf, recording an evaluation fault if one occurs.
    fn leaf<R: RulesEngine>(&mut self, position: &R) -> Score {
        match self.evaluator.try_evaluate(position) {
            Ok(score) => score,
            Err(fault) => {
                warn!(%fault, "evaluation fault, scoring leaf as level");
                self.faults.push(fault.into());
                Score::ZERO
            }
        }
    }
}
