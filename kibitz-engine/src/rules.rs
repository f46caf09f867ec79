//! The interface between the search and whatever plays the role of the rules.
//!
//! The searcher and evaluator only ever see a position through `RulesEngine`.
//! They never build or validate moves themselves, and never look at how a
//! board is stored.

use std::fmt::{Debug, Display};

use crate::coretypes::{Color, MoveList, Piece, Square};
use crate::error::RulesError;

/// A mutable game state that knows its own rules.
///
/// `apply` and `undo` form a stack: `undo` must exactly revert the most recent
/// `apply` that has not been undone yet, so that a position after any balanced
/// sequence of calls compares equal to the position before it.
pub trait RulesEngine {
    /// Opaque move token produced by `legal_moves`.
    type Move: Copy + Eq + Debug + Display;

    /// Player whose turn it is.
    fn side_to_move(&self) -> Color;

    /// All legal moves for the side to move. The order is the search order.
    fn legal_moves(&self) -> MoveList<Self::Move>;

    /// Apply a move produced by `legal_moves`. On error the position is unchanged.
    fn apply(&mut self, move_: Self::Move) -> Result<(), RulesError>;

    /// Revert the most recently applied move.
    fn undo(&mut self) -> Result<(), RulesError>;

    /// True once the game has ended for any reason.
    fn is_game_over(&self) -> bool;

    /// True if the game is drawn by a rule specific to the variant being played.
    fn is_variant_draw(&self) -> bool {
        false
    }

    /// True if the game is won or lost by a rule specific to the variant being played.
    fn is_variant_end(&self) -> bool {
        false
    }

    /// Piece standing on a square, if any.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Square of a color's king, or None if it has no king.
    fn king_square(&self, color: Color) -> Option<Square>;
}
