//! Fault Containment
//!
//! A rules engine that misbehaves on chosen moves, to check that faults deep
//! in the tree degrade to level scores while faults at the root, and failed
//! undos anywhere, give no move.

use kibitz_engine::coretypes::{Color, Move, MoveList, Piece, Score, Square, Square::*};
use kibitz_engine::error::{EvaluationFault, RulesError};
use kibitz_engine::*;

/// Wraps a `Position`, failing in a chosen way whenever a chosen move is played.
#[derive(Debug, Clone, Default)]
struct Faulty {
    inner: Position,
    /// `apply` of this move fails.
    failing_apply: Option<Move>,
    /// `undo` of this move fails, and the move stays applied.
    failing_undo: Option<Move>,
    /// Once this move is played, White's king disappears and the variant reports the game ended.
    kingless: Option<Move>,
    /// Once this move is played, no legal moves are reported though the game is not over.
    dead_end: Option<Move>,
}

impl Faulty {
    fn new(fen: &str) -> Self {
        Self {
            inner: Position::parse_fen(fen).unwrap(),
            ..Self::default()
        }
    }

    fn played(&self, marker: Option<Move>) -> bool {
        marker.map_or(false, |marker| {
            self.inner.history().iter().any(|info| info.move_() == marker)
        })
    }
}

impl RulesEngine for Faulty {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    fn legal_moves(&self) -> MoveList {
        match self.played(self.dead_end) {
            true => MoveList::new(),
            false => self.inner.get_legal_moves(),
        }
    }

    fn apply(&mut self, move_: Move) -> Result<(), RulesError> {
        if Some(move_) == self.failing_apply {
            return Err(RulesError::IllegalMove(move_.to_string()));
        }
        self.inner.do_move(move_)
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        let last = self.inner.history().last().map(|info| info.move_());
        if last.is_some() && last == self.failing_undo {
            return Err(RulesError::NothingToUndo);
        }
        self.inner.undo_move().map(|_| ())
    }

    fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    fn is_variant_end(&self) -> bool {
        self.played(self.kingless)
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.inner.board()[square]
    }

    fn king_square(&self, color: Color) -> Option<Square> {
        match color == Color::White && self.played(self.kingless) {
            true => None,
            false => self.inner.king_square(color),
        }
    }
}

const HANGING_QUEEN: &str = "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1";

#[test]
fn well_behaved_wrapper_matches_position() {
    let mut faulty = Faulty::new(HANGING_QUEEN);
    let result = Searcher::default().analyze(&mut faulty, 2);
    assert_eq!(result.best_move, Some(Move::new(D1, D5, None)));
    assert_eq!(result.score, Some(Score(5)));
    assert!(!result.is_degraded());
}

#[test]
fn evaluation_fault_scores_leaf_as_level() {
    let mut faulty = Faulty::new(HANGING_QUEEN);
    faulty.kingless = Some(Move::new(D1, D5, None));
    let mut searcher = Searcher::default();
    let result = searcher.analyze(&mut faulty, 1);

    // Winning the queen now scores 0, which still beats losing the rook.
    assert_eq!(result.best_move, Some(Move::new(D1, D5, None)));
    assert_eq!(result.score, Some(Score::ZERO));
    assert_eq!(
        result.faults,
        vec![Fault::Evaluation(EvaluationFault::MissingKing(Color::White))]
    );
    assert_eq!(searcher.faults(), result.faults.as_slice());
    assert_eq!(faulty.inner, Position::parse_fen(HANGING_QUEEN).unwrap());
}

#[test]
fn apply_fault_below_root_scores_node_as_level() {
    // Black's queen can never land on d1, so every reply node that tries it
    // scores as level. Taking the queen first avoids those nodes entirely.
    let mut faulty = Faulty::new(HANGING_QUEEN);
    faulty.failing_apply = Some(Move::new(D5, D1, None));
    let before = faulty.inner.clone();
    let result = Searcher::default().analyze(&mut faulty, 2);

    assert_eq!(result.best_move, Some(Move::new(D1, D5, None)));
    assert_eq!(result.score, Some(Score(5)));
    assert!(result.is_degraded());
    assert!(result
        .faults
        .iter()
        .all(|fault| matches!(fault, Fault::Search(RulesError::IllegalMove(_)))));
    assert_eq!(faulty.inner, before);
}

#[test]
fn apply_fault_at_root_gives_no_move() {
    let mut faulty = Faulty::new(HANGING_QUEEN);
    faulty.failing_apply = Some(Move::new(D1, D5, None));
    let result = Searcher::default().analyze(&mut faulty, 2);

    assert_eq!(result.best_move, None);
    assert_eq!(result.score, None);
    assert_eq!(
        result.faults.last(),
        Some(&Fault::Search(RulesError::IllegalMove("d1d5".to_string())))
    );
}

#[test]
fn undo_fault_at_root_gives_no_move() {
    let mut faulty = Faulty::new(HANGING_QUEEN);
    faulty.failing_undo = Some(Move::new(D1, D2, None));
    let result = Searcher::default().analyze(&mut faulty, 1);

    assert_eq!(result.best_move, None);
    assert_eq!(result.faults, vec![Fault::Search(RulesError::NothingToUndo)]);
}

#[test]
fn undo_fault_below_root_abandons_search() {
    for depth in [2, 3] {
        // Black's king step is played in the first root branch, Rd2.
        let mut faulty = Faulty::new(HANGING_QUEEN);
        faulty.failing_undo = Some(Move::new(E8, F8, None));
        let mut searcher = Searcher::default();
        let result = searcher.analyze(&mut faulty, depth);

        assert_eq!(result.best_move, None, "depth {depth}");
        assert_eq!(result.score, None, "depth {depth}");
        assert_eq!(result.faults, vec![Fault::Search(RulesError::NothingToUndo)]);

        // Nothing was applied or undone after the failure.
        let line: Vec<Move> = faulty.inner.history().iter().map(|info| info.move_()).collect();
        assert_eq!(line, vec![Move::new(D1, D2, None), Move::new(E8, F8, None)]);
    }
}

#[test]
fn no_moves_in_live_position_is_evaluated_as_leaf() {
    let mut faulty = Faulty::new(HANGING_QUEEN);
    faulty.dead_end = Some(Move::new(D1, D5, None));
    let result = Searcher::default().analyze(&mut faulty, 2);

    assert_eq!(result.best_move, Some(Move::new(D1, D5, None)));
    assert_eq!(result.score, Some(Score(5)));
    assert_eq!(result.faults, vec![Fault::NoMovesInLivePosition]);
}

#[test]
fn faults_reset_between_searches() {
    let mut searcher = Searcher::default();
    let mut faulty = Faulty::new(HANGING_QUEEN);
    faulty.dead_end = Some(Move::new(D1, D5, None));
    searcher.analyze(&mut faulty, 2);
    assert_eq!(searcher.faults().len(), 1);

    let mut position = Position::parse_fen(HANGING_QUEEN).unwrap();
    let result = searcher.analyze(&mut position, 2);
    assert!(searcher.faults().is_empty());
    assert!(!result.is_degraded());
}
