//! King of the Hill
//!
//! A king that reaches d4, e4, d5 or e5 ends the game. The evaluator rewards
//! White's king for standing on the hill once the game has ended that way.

use kibitz_engine::coretypes::{Color::*, Move, Score, Square::*};
use kibitz_engine::*;

fn position(fen: &str, variant: Variant) -> Position {
    Position::parse_fen(fen).unwrap().with_variant(variant)
}

#[test]
fn white_king_climbs_the_hill() {
    let fen = "4k3/8/8/8/8/2K5/7P/8 w - - 0 1";

    let mut hill = position(fen, Variant::KingOfTheHill);
    let result = Searcher::default().analyze(&mut hill, 1);
    assert_eq!(result.best_move, Some(Move::new(C3, D4, None)));
    assert_eq!(result.score, Some(Score(2)));

    // Under standard rules every move keeps the pawn up, so the first move is kept.
    let mut standard = position(fen, Variant::Standard);
    let result = Searcher::default().analyze(&mut standard, 1);
    assert_eq!(result.best_move, Some(Move::new(H2, H3, None)));
    assert_eq!(result.score, Some(Score(1)));
}

#[test]
fn white_king_plans_two_steps_to_the_hill() {
    let mut hill = position("7k/8/8/8/8/8/2K4P/8 w - - 0 1", Variant::KingOfTheHill);
    let result = Searcher::default().analyze(&mut hill, 3);

    let first_steps = [Move::new(C2, C3, None), Move::new(C2, D3, None)];
    assert!(first_steps.contains(&result.best_move.unwrap()));
    assert_eq!(result.score, Some(Score(2)));
}

#[test]
fn game_ends_on_the_hill() {
    let mut hill = position("4k3/8/8/8/8/2K5/7P/8 w - - 0 1", Variant::KingOfTheHill);
    hill.do_legal_move(Move::new(C3, D4, None)).unwrap();

    assert!(hill.is_game_over());
    assert!(hill.is_variant_end());
    assert_eq!(hill.outcome(), Some(Outcome::KingOfTheHill { winner: White }));

    // Every reply to a finished game is scored as a leaf.
    let result = Searcher::default().analyze(&mut hill, 2);
    assert_eq!(result.nodes, 1 + hill.get_legal_moves().len() as u64);
}

#[test]
fn bare_kings_race_for_the_hill() {
    let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
    let standard = position(fen, Variant::Standard);
    assert!(standard.is_insufficient_material());
    assert_eq!(standard.outcome(), Some(Outcome::InsufficientMaterial));

    let mut hill = position(fen, Variant::KingOfTheHill);
    assert!(!hill.is_insufficient_material());
    assert!(!hill.is_game_over());
    assert_eq!(hill.outcome(), None);

    // Replies are searched, not scored as finished games.
    let result = Searcher::default().analyze(&mut hill, 2);
    assert!(result.best_move.is_some());
    assert!(result.nodes > 1 + hill.get_legal_moves().len() as u64);
}

#[test]
fn black_on_the_hill_earns_no_bonus() {
    let evaluator = Evaluator::default();
    let hill = position("8/8/8/8/4k3/8/8/K6R b - - 0 1", Variant::KingOfTheHill);
    assert_eq!(hill.outcome(), Some(Outcome::KingOfTheHill { winner: Black }));
    assert_eq!(evaluator.evaluate(&hill), Score(5));
}

#[test]
fn variant_parses_from_cli_names() {
    assert_eq!("koth".parse::<Variant>().unwrap(), Variant::KingOfTheHill);
    assert_eq!("KingOfTheHill".parse::<Variant>().unwrap(), Variant::KingOfTheHill);
    assert_eq!("standard".parse::<Variant>().unwrap(), Variant::Standard);
    assert!("crazyhouse".parse::<Variant>().is_err());
}
