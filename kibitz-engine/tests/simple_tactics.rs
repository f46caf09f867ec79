//! Simple Tactics
//!
//! Tests to ensure the searcher wins material it can see within its depth.
//! The evaluator only counts material, so these are all material wins.

use kibitz_engine::coretypes::{Color::*, Move, Score, Square::*};
use kibitz_engine::*;

fn search(fen: &str, depth: u8) -> SearchResult<Move> {
    let mut position = Position::parse_fen(fen).unwrap();
    let before = position.clone();
    let result = Searcher::default().analyze(&mut position, depth);
    assert_eq!(position, before, "search must leave the position unchanged");
    assert!(result.faults.is_empty());
    result
}

#[test]
fn capture_hanging_queen() {
    let result = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 1);

    assert_eq!(result.best_move, Some(Move::new(D1, D5, None)));
    assert_eq!(result.score, Some(Score(5)));
    assert_eq!(result.leading(), Some(White));
}

#[test]
fn capture_hanging_queen_deeper() {
    for depth in 2..=3 {
        let result = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", depth);
        assert_eq!(result.best_move, Some(Move::new(D1, D5, None)));
        assert_eq!(result.score, Some(Score(5)));
    }
}

#[test]
fn take_undefended_pawn_with_queen() {
    let result = search("4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1", 2);

    assert_eq!(result.best_move, Some(Move::new(D4, E5, None)));
    assert_eq!(result.score, Some(Score(9)));
}

#[test]
fn knight_fork_wins_rook() {
    let result = search("r3k3/8/8/3N4/8/8/8/6K1 w - - 0 1", 3);

    assert_eq!(result.best_move, Some(Move::new(D5, C7, None)));
    assert_eq!(result.score, Some(Score(3)));
    assert_eq!(result.leading(), Some(White));
}

#[test]
fn knight_fork_wins_rook_as_black() {
    let mut position = Position::parse_fen("r3k3/8/8/3N4/8/8/8/6K1 w - - 0 1")
        .unwrap()
        .color_flip();
    let result = Searcher::default().analyze(&mut position, 3);

    assert_eq!(result.player, Black);
    assert_eq!(result.best_move, Some(Move::new(D4, C2, None)));
    assert_eq!(result.score, Some(Score(-3)));
    assert_eq!(result.relative_score(), Some(Score(3)));
    assert_eq!(result.leading(), Some(Black));
}

#[test]
fn black_to_move_at_start_plays_first_move() {
    let result = search(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        1,
    );

    assert_eq!(result.best_move, Some(Move::new(A7, A6, None)));
    assert_eq!(result.score, Some(Score::ZERO));
    assert_eq!(result.leading(), None);
}

#[test]
fn quiet_start_keeps_first_move() {
    let result = search(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        2,
    );

    assert_eq!(result.best_move, Some(Move::new(B1, C3, None)));
    assert_eq!(result.score, Some(Score::ZERO));
}

#[test]
fn checkmated_side_has_no_move() {
    let result = search("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 4);

    assert_eq!(result.best_move, None);
    assert_eq!(result.score, None);
}
