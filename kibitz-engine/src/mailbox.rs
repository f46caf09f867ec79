//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.
//!
//! A Mailbox is an array of size Files x Ranks where each index may contain a
//! chess piece or be empty.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use crate::coretypes::{Color, Piece, PieceKind, Square, NUM_FILES, NUM_RANKS, NUM_SQUARES};

/// Classic 8x8 square board representation of Chess board.
/// Index starts at A1.
/// A1 = idx 0
/// B1 = idx 1
/// A2 = idx 8
/// H8 = idx 63
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [Option<Piece>; NUM_SQUARES],
}

impl Mailbox {
    /// Creates an empty Mailbox, where all squares are None.
    pub const fn new() -> Self {
        Mailbox {
            board: [None; NUM_SQUARES],
        }
    }

    /// Create Mailbox with pieces arranged in starting chess position.
    pub fn start_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; NUM_FILES] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut mb = Self::new();

        for (file, piece_kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            let squares = (Square::new(file, 0), Square::new(file, 7));
            if let (Some(white), Some(black)) = squares {
                mb[white] = Some(Piece::new(Color::White, piece_kind));
                mb[black] = Some(Piece::new(Color::Black, piece_kind));
            }
            let pawns = (Square::new(file, 1), Square::new(file, 6));
            if let (Some(white), Some(black)) = pawns {
                mb[white] = Some(Piece::new(Color::White, Pawn));
                mb[black] = Some(Piece::new(Color::Black, Pawn));
            }
        }

        mb
    }

    /// Iterate over every occupied square, from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(|square| self[square].map(|piece| (square, piece)))
    }

    /// First square holding the given piece.
    pub fn find(&self, piece: Piece) -> Option<Square> {
        self.pieces()
            .find(|(_, other)| *other == piece)
            .map(|(square, _)| square)
    }

    /// Mirror the board vertically and swap every piece's color.
    pub fn color_flip(&self) -> Self {
        let mut flipped = Self::new();
        for (square, piece) in self.pieces() {
            flipped[square.flip_rank()] = Some(Piece::new(!piece.color(), piece.piece_kind()));
        }
        flipped
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "  +---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(640);

        pretty.push_str(RANK_SEP);
        for rank in (0..NUM_RANKS as u8).rev() {
            pretty.push_str(&(rank + 1).to_string());
            pretty.push_str(" | ");

            for file in 0..NUM_FILES as u8 {
                let occupant = Square::new(file, rank).and_then(|square| self[square]);
                pretty.push(match occupant {
                    Some(piece) => char::from(piece),
                    None => '.',
                });
                pretty.push_str(" | ");
            }
            pretty.pop();
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("    a   b   c   d   e   f   g   h\n");

        pretty
    }
}

impl Index<Square> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, square: Square) -> &Self::Output {
        &self.board[square.idx()]
    }
}

impl IndexMut<Square> for Mailbox {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.board[square.idx()]
    }
}

/// Default value is that of a standard starting chess position.
impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::start_position()
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}
