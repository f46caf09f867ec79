//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of nodes at a specific depth.

use std::ops::{Add, AddAssign};
use std::panic;
use std::thread;

use crate::coretypes::PlyKind;
use crate::error::RulesError;
use crate::rules::RulesEngine;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

/// Count the number of nodes at a certain depth.
/// This ignores higher terminal nodes.
/// In other words, it counts the number of paths to the given depth.
///
/// With more than one thread, root moves are split into contiguous chunks and
/// each chunk is counted on its own clone of the position.
pub fn perft<R>(position: &R, ply: PlyKind, threads: usize) -> Result<PerftInfo, RulesError>
where
    R: RulesEngine + Clone + Send,
    R::Move: Send + Sync,
{
    // Guard easy to calculate inputs.
    if ply == 0 {
        // Ever only 1 position at 0 ply.
        return Ok(PerftInfo::new(1));
    } else if ply <= 2 || threads <= 1 {
        // Simple enough to not require threads, or single threaded.
        return perft_recurse(&mut position.clone(), ply);
    }

    let legal_moves = position.legal_moves();
    // Guard no moves to search.
    if legal_moves.is_empty() {
        return Ok(PerftInfo::new(0));
    }
    let chunk_size = (legal_moves.len() + threads - 1) / threads;

    thread::scope(|scope| {
        let handles: Vec<_> = legal_moves
            .chunks(chunk_size)
            .map(|moves| {
                let mut position = position.clone();
                scope.spawn(move || perft_executor(&mut position, ply, moves))
            })
            .collect();

        let mut total = PerftInfo::new(0);
        for handle in handles {
            match handle.join() {
                Ok(perft_info) => total += perft_info?,
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        Ok(total)
    })
}

/// Run perft below each of the given root moves. Ply must be greater than 1.
fn perft_executor<R: RulesEngine>(
    position: &mut R,
    ply: PlyKind,
    moves: &[R::Move],
) -> Result<PerftInfo, RulesError> {
    debug_assert!(ply > 1);
    let mut perft_info = PerftInfo::new(0);
    for &move_ in moves {
        position.apply(move_)?;
        perft_info += perft_recurse(position, ply - 1)?;
        position.undo()?;
    }
    Ok(perft_info)
}

/// Ply must be non-zero.
fn perft_recurse<R: RulesEngine>(position: &mut R, ply: PlyKind) -> Result<PerftInfo, RulesError> {
    debug_assert_ne!(ply, 0);
    let legal_moves = position.legal_moves();
    if ply == 1 {
        // If we reach the depth before the end,
        // return the count of legal moves.
        Ok(PerftInfo::new(legal_moves.len() as u64))
    } else {
        let mut perft_info = PerftInfo::new(0);
        for legal_move in legal_moves {
            position.apply(legal_move)?;
            perft_info += perft_recurse(position, ply - 1)?;
            position.undo()?;
        }
        Ok(perft_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn start_position_shallow() {
        let start = Position::start_position();
        assert_eq!(perft(&start, 0, 1), Ok(PerftInfo::new(1)));
        assert_eq!(perft(&start, 1, 1), Ok(PerftInfo::new(20)));
        assert_eq!(perft(&start, 2, 1), Ok(PerftInfo::new(400)));
    }

    #[test]
    fn threads_agree_with_single_thread() {
        let start = Position::start_position();
        let single = perft(&start, 3, 1).unwrap();
        let threaded = perft(&start, 3, 4).unwrap();
        assert_eq!(single, PerftInfo::new(8902));
        assert_eq!(single, threaded);
    }
}
