//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//!
//! FEN ::=
//!       Piece Placement
//!   ' ' Side to move
//!   ' ' Castling ability
//!   ' ' En passant target square
//!   ' ' Halfmove clock
//!   ' ' Fullmove counter
//!
//! The two move counters may be omitted, in which case they default to 0 and 1.

use std::convert::TryFrom;

use crate::coretypes::{
    Castling, Color, MoveCount, Piece, PieceKind, Square, NUM_FILES, NUM_RANKS,
};
use crate::error::{self, Error};
use crate::mailbox::Mailbox;
use crate::position::{Position, Variant};

/// Allows conversion of a type to and from a FEN string.
pub trait Fen: Sized {
    /// Attempt to parse a FEN string into a new instance.
    fn parse_fen(input: &str) -> error::Result<Self>;
    /// Returns the FEN string that represents self.
    fn to_fen(&self) -> String;
}

fn fen_error(message: impl Into<String>) -> Error {
    Error::Fen(message.into())
}

fn parse_placement(placement: &str) -> error::Result<Mailbox> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err(fen_error(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut mailbox = Mailbox::new();
    // FEN lists ranks from 8 down to 1.
    for (row, rank_str) in ranks.into_iter().enumerate() {
        let rank = (NUM_RANKS - 1 - row) as u8;
        let mut file: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(fen_error(format!("bad empty run {ch:?}")));
                }
                file += skip as u8;
            } else {
                let piece = Piece::try_from(ch)?;
                let square = Square::new(file, rank)
                    .ok_or_else(|| fen_error(format!("rank {} is too long", rank + 1)))?;
                mailbox[square] = Some(piece);
                file += 1;
            }
            if file as usize > NUM_FILES {
                return Err(fen_error(format!("rank {} is too long", rank + 1)));
            }
        }
        if file as usize != NUM_FILES {
            return Err(fen_error(format!("rank {} is too short", rank + 1)));
        }
    }
    Ok(mailbox)
}

fn placement_to_fen(mailbox: &Mailbox) -> String {
    let mut placement = String::with_capacity(72);
    for rank in (0..NUM_RANKS as u8).rev() {
        let mut empty = 0;
        for file in 0..NUM_FILES as u8 {
            match Square::new(file, rank).and_then(|square| mailbox[square]) {
                Some(piece) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(char::from(piece));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }
    placement
}

/// Reject piece sets no game can reach: one king per side, at most eight pawns,
/// no pawn on a back rank, and no more promoted pieces than missing pawns.
/// Such a board never has more than `MAX_MOVES` legal moves.
fn check_material(mailbox: &Mailbox) -> error::Result<()> {
    for color in Color::ALL {
        // King, queen, rook, bishop, knight, pawn.
        let mut counts = [0u8; 6];
        for (square, piece) in mailbox.pieces().filter(|(_, piece)| piece.color() == color) {
            let index = match piece.piece_kind() {
                PieceKind::King => 0,
                PieceKind::Queen => 1,
                PieceKind::Rook => 2,
                PieceKind::Bishop => 3,
                PieceKind::Knight => 4,
                PieceKind::Pawn => 5,
            };
            counts[index] += 1;
            let back_rank = square.rank() == 0 || square.rank() == 7;
            if piece.piece_kind() == PieceKind::Pawn && back_rank {
                return Err(fen_error(format!("{color} pawn on back rank at {square}")));
            }
        }

        let [kings, queens, rooks, bishops, knights, pawns] = counts;
        if kings != 1 {
            return Err(fen_error(format!("{color} has {kings} kings")));
        }
        let promoted = queens.saturating_sub(1)
            + rooks.saturating_sub(2)
            + bishops.saturating_sub(2)
            + knights.saturating_sub(2);
        if pawns > 8 || promoted + pawns > 8 {
            return Err(fen_error(format!("{color} has too many pieces")));
        }
    }
    Ok(())
}

impl Fen for Position {
    fn parse_fen(input: &str) -> error::Result<Self> {
        let mut fields = input.split_whitespace();
        let mut next_field = |name: &str| {
            fields
                .next()
                .ok_or_else(|| fen_error(format!("missing {name} field")))
        };

        let board = parse_placement(next_field("placement")?)?;

        let side_to_move = match next_field("side to move")? {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(Error::ParseColorMalformed(other.to_string())),
        };

        let castling: Castling = next_field("castling")?.parse()?;

        let en_passant = match next_field("en passant")? {
            "-" => None,
            square => Some(square.parse::<Square>()?),
        };

        let mut counter = |name: &str, default: MoveCount| -> error::Result<MoveCount> {
            match fields.next() {
                Some(value) => value
                    .parse()
                    .map_err(|_| fen_error(format!("bad {name} {value:?}"))),
                None => Ok(default),
            }
        };
        let halfmoves = counter("halfmove clock", 0)?;
        let fullmoves = counter("fullmove number", 1)?;

        check_material(&board)?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
            variant: Variant::Standard,
            history: Vec::new(),
        })
    }

    fn to_fen(&self) -> String {
        let en_passant = match self.en_passant {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            placement_to_fen(&self.board),
            self.side_to_move.to_char(),
            self.castling,
            en_passant,
            self.halfmoves,
            self.fullmoves
        )
    }
}
