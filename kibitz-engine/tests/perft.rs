//! Performance Test (perft)
//!
//! Checks the bundled rules engine's move generation against known node counts.
//! [Perft Results](https://www.chessprogramming.org/Perft_Results)

use std::thread::available_parallelism;

use kibitz_engine::perft::*;
use kibitz_engine::*;

const ONE_THREAD: usize = 1;

fn cpu_threads() -> usize {
    available_parallelism()
        .map(|inner| inner.get())
        .unwrap_or(1)
}

/// Run single and multithreaded perft for each ply in `expected_nodes`.
/// The index of each expected_node value is its ply.
fn perft_tester(position: &Position, expected_nodes: &[u64]) {
    for (ply, &expected_node) in expected_nodes.iter().enumerate() {
        let single_thread_result = perft(position, ply as u8, ONE_THREAD).unwrap();
        let multi_thread_result = perft(position, ply as u8, cpu_threads()).unwrap();

        println!("perft({ply}): {single_thread_result:?}");
        assert_eq!(single_thread_result.nodes, expected_node);
        assert_eq!(single_thread_result, multi_thread_result);
    }
}

fn parse(fen: &str) -> Position {
    Position::parse_fen(fen).unwrap()
}

#[test]
fn perft_starting_position() {
    perft_tester(&Position::start_position(), &[1, 20, 400, 8_902]);
}

#[test]
#[ignore]
fn perft_starting_position_expensive() {
    let ply4 = perft(&Position::start_position(), 4, cpu_threads()).unwrap();
    assert_eq!(ply4.nodes, 197_281);
}

#[test]
fn perft_kiwipete_position() {
    // https://www.chessprogramming.org/Perft_Results#Position_2
    let kiwipete =
        parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    perft_tester(&kiwipete, &[1, 48, 2_039, 97_862]);
}

#[test]
fn perft_test_position_3() {
    // En passant pins along the rank.
    perft_tester(
        &parse("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
        &[1, 14, 191, 2_812, 43_238],
    );
}

#[test]
fn perft_test_position_4() {
    let position = parse("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    perft_tester(&position, &[1, 6, 264, 9_467]);
    // Mirrored position has the same counts.
    perft_tester(&position.color_flip(), &[1, 6, 264, 9_467]);
}

#[test]
fn perft_test_position_5() {
    perft_tester(
        &parse("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8"),
        &[1, 44, 1_486, 62_379],
    );
}

#[test]
fn perft_test_position_6() {
    perft_tester(
        &parse("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10"),
        &[1, 46, 2_079, 89_890],
    );
}

#[test]
fn perft_after_moves_played() {
    let mut position = Position::start_position();
    position.do_legal_move("e2e4".parse().unwrap()).unwrap();
    perft_tester(&position, &[1, 20, 600]);
}
