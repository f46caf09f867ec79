//! The fundamental and simple types of `kibitz_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::ops::{Add, AddAssign, Mul, Neg, Not, Sub};
use std::str::FromStr;

use arrayvec::ArrayVec;

use crate::error::{self, Error};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // a, b, c, d, e, f, g, h
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// The max possible measured number of moves for any chess position.
pub const MAX_MOVES: usize = 218;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for search depth in plies.
pub type PlyKind = u8;

/// Counter for half-move clock and full-moves.
pub type MoveCount = u16;

// Type alias to make changing Score inner type easy if needed.
pub type ScoreKind = i32;

/// A fixed capacity list able to hold every legal move of any chess position.
pub type MoveList<M = Move> = ArrayVec<M, MAX_MOVES>;

/// Absolute material score. Positive favors White, negative favors Black.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Score(pub ScoreKind);

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

/// The six kinds of chess pieces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Observe Castling rights for a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Castling(u8);

/// Square
/// Every possible square on a chess board.
/// `Square::A1 as u8` is 0 and `Square::H8 as u8` is 63, counting files first.
/// WARNING: The exact ordering of enums is important for their discriminants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8 = 63u8,
}

/// Move
/// Coordinate form of moving a single chess piece, one ply.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) promotion: Option<PieceKind>,
}

/// Enum describing the kind of a move once it has been applied.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveKind {
    /// Moved to an empty square.
    Quiet,
    /// Captured a piece standing on the target square.
    Capture(PieceKind),
    /// King moved two squares and the rook jumped over it.
    Castle,
    /// Pawn captured a pawn that just double pushed past it.
    EnPassant,
}

//////////////////////
/// Implementations //
//////////////////////

impl Score {
    /// Stand-in for negative infinity. + 1 to avoid overflow error on negate.
    pub const MIN: Score = Self(ScoreKind::MIN + 1);
    /// Stand-in for positive infinity.
    pub const MAX: Score = Self(ScoreKind::MAX);
    pub const ZERO: Score = Self(0);

    /// Returns the sign of Score value, either 1, -1, or 0.
    pub const fn signum(&self) -> ScoreKind {
        self.0.signum()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Returns the color this score favors, or None if level.
    pub const fn leading(&self) -> Option<Color> {
        match self.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl Add for Score {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Sub for Score {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl Mul for Score {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl Neg for Score {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
impl Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::MAX => f.write_str("+inf"),
            Self::MIN => f.write_str("-inf"),
            Self(value) => write!(f, "{:+}", value),
        }
    }
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// FEN compliant conversion.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Returns the absolute sign of a Color as a Score.
    pub const fn sign(&self) -> Score {
        match self {
            Color::White => Score(1),
            Color::Black => Score(-1),
        }
    }

    /// Rank on which this color's pawns start.
    pub(crate) const fn pawn_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Direction pawns of this color advance in, as a rank delta.
    pub(crate) const fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl TryFrom<char> for Color {
    type Error = Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err(Error::ParseColorMalformed(ch.to_string())),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Pieces a pawn may promote to, in the order they are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Returns true if PieceKind can slide, false otherwise.
    pub const fn is_sliding(&self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = match value.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return Err(Error::ParsePieceMalformed(value)),
        };
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Castling {
    pub const W_KING: Castling = Castling(0b0001);
    pub const W_QUEEN: Castling = Castling(0b0010);
    pub const B_KING: Castling = Castling(0b0100);
    pub const B_QUEEN: Castling = Castling(0b1000);
    pub const W_SIDE: Castling = Castling(Self::W_KING.0 | Self::W_QUEEN.0);
    pub const B_SIDE: Castling = Castling(Self::B_KING.0 | Self::B_QUEEN.0);
    pub const ALL: Castling = Castling(Self::W_SIDE.0 | Self::B_SIDE.0);
    pub const NONE: Castling = Castling(0);

    /// Returns true if there are no castling rights.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if Castling mask has all of provided bits.
    pub const fn has(&self, rights: Castling) -> bool {
        self.0 & rights.0 == rights.0
    }

    pub fn set(&mut self, rights: Castling) {
        self.0 |= rights.0;
    }

    pub fn clear(&mut self, rights: Castling) {
        self.0 &= !rights.0;
    }

    /// Removes all castling rights for a color.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => self.clear(Self::W_SIDE),
            Color::Black => self.clear(Self::B_SIDE),
        }
    }

    /// Rights of White become rights of Black and vice versa.
    pub const fn color_flip(&self) -> Self {
        Castling(((self.0 & Self::W_SIDE.0) << 2) | ((self.0 & Self::B_SIDE.0) >> 2))
    }

    /// The right lost when a piece leaves or lands on `square`, if it is a rook corner.
    pub(crate) const fn lost_on(square: Square) -> Castling {
        match square {
            Square::A1 => Self::W_QUEEN,
            Square::H1 => Self::W_KING,
            Square::A8 => Self::B_QUEEN,
            Square::H8 => Self::B_KING,
            _ => Self::NONE,
        }
    }
}

impl Default for Castling {
    fn default() -> Self {
        Self::ALL
    }
}

/// Displays in FEN-component format.
impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_none() {
            return f.write_char('-');
        }
        for (right, ch) in [
            (Self::W_KING, 'K'),
            (Self::W_QUEEN, 'Q'),
            (Self::B_KING, 'k'),
            (Self::B_QUEEN, 'q'),
        ] {
            if self.has(right) {
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}

/// Castling ::= '-' | ['K'] ['Q'] ['k'] ['q']
impl FromStr for Castling {
    type Err = Error;
    fn from_str(s: &str) -> error::Result<Self> {
        if s == "-" {
            return Ok(Castling::NONE);
        }
        if s.is_empty() {
            return Err(Error::ParseCastlingMalformed(s.to_string()));
        }
        let mut rights = Castling::NONE;
        for ch in s.chars() {
            match ch {
                'K' => rights.set(Self::W_KING),
                'Q' => rights.set(Self::W_QUEEN),
                'k' => rights.set(Self::B_KING),
                'q' => rights.set(Self::B_QUEEN),
                _ => return Err(Error::ParseCastlingMalformed(s.to_string())),
            }
        }
        Ok(rights)
    }
}

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; NUM_SQUARES] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// The four central squares d4, e4, d5 and e5.
    pub const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

    /// Square from zero-based file and rank, or None if off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < NUM_FILES && (rank as usize) < NUM_RANKS {
            Some(Self::ALL[rank as usize * NUM_FILES + file as usize])
        } else {
            None
        }
    }

    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < NUM_SQUARES {
            Some(Self::ALL[idx])
        } else {
            None
        }
    }

    pub const fn idx(&self) -> usize {
        *self as usize
    }

    /// Zero-based file, 0 for the a-file.
    pub const fn file(&self) -> u8 {
        *self as u8 % NUM_FILES as u8
    }

    /// Zero-based rank, 0 for the first rank.
    pub const fn rank(&self) -> u8 {
        *self as u8 / NUM_FILES as u8
    }

    /// Square displaced by a file and rank delta, or None if that leaves the board.
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Mirror square across the horizontal center line, a1 <-> a8.
    pub const fn flip_rank(&self) -> Self {
        Self::ALL[(7 - self.rank() as usize) * NUM_FILES + self.file() as usize]
    }

    pub const fn is_center(&self) -> bool {
        matches!(self, Square::D4 | Square::E4 | Square::D5 | Square::E5)
    }

    /// True for dark squares, a1 being dark.
    pub const fn is_dark(&self) -> bool {
        (self.file() + self.rank()) % 2 == 0
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.file()) as char)?;
        f.write_char((b'1' + self.rank()) as char)
    }
}

/// Square ::= file rank, for example "e4".
impl FromStr for Square {
    type Err = Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let malformed = || Error::ParseSquareMalformed(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(malformed());
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(malformed)
    }
}

impl Move {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }
    pub const fn from(&self) -> Square {
        self.from
    }
    pub const fn to(&self) -> Square {
        self.to
    }
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }
}

/// Coordinate notation, "e2e4" or "e7e8q".
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let malformed = || Error::ParseMoveMalformed(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(malformed());
        }
        let from: Square = s[0..2].parse().map_err(|_| malformed())?;
        let to: Square = s[2..4].parse().map_err(|_| malformed())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(ch) => match ch {
                'n' => Some(PieceKind::Knight),
                'b' => Some(PieceKind::Bishop),
                'r' => Some(PieceKind::Rook),
                'q' => Some(PieceKind::Queen),
                _ => return Err(malformed()),
            },
        };
        Ok(Move::new(from, to, promotion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn square_coordinates() {
        assert_eq!(E4.file(), 4);
        assert_eq!(E4.rank(), 3);
        assert_eq!(Square::new(4, 3), Some(E4));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(A1.offset(-1, 0), None);
        assert_eq!(G1.offset(-1, 2), Some(F3));
        assert_eq!(C2.flip_rank(), C7);
        assert!(A1.is_dark());
        assert!(!H1.is_dark());
        assert!(Square::CENTER.iter().all(Square::is_center));
        assert!(!C4.is_center());
    }

    #[test]
    fn parse_and_display_moves() {
        let move_: Move = "e2e4".parse().unwrap();
        assert_eq!(move_, Move::new(E2, E4, None));
        assert_eq!(move_.to_string(), "e2e4");

        let promo: Move = "a7a8n".parse().unwrap();
        assert_eq!(promo, Move::new(A7, A8, Some(PieceKind::Knight)));
        assert_eq!(promo.to_string(), "a7a8n");

        for bad in ["", "e2", "e2e9", "e2e4k", "i2e4", "e2e4qq"] {
            assert!(bad.parse::<Move>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn castling_rights() {
        let mut castling: Castling = "Kq".parse().unwrap();
        assert!(castling.has(Castling::W_KING));
        assert!(!castling.has(Castling::W_QUEEN));
        assert_eq!(castling.color_flip().to_string(), "Qk");

        castling.clear_color(Color::Black);
        assert_eq!(castling.to_string(), "K");
        assert_eq!("-".parse::<Castling>().unwrap(), Castling::NONE);
        assert!("KX".parse::<Castling>().is_err());
    }

    #[test]
    fn score_sentinels_negate_safely() {
        assert_eq!(-Score::MIN, Score::MAX);
        assert_eq!(-Score::MAX, Score::MIN);
        assert_eq!(Score::MAX.to_string(), "+inf");
        assert_eq!(Score(-4).to_string(), "-4");
        assert_eq!(Score(3).leading(), Some(Color::White));
        assert_eq!(Score::ZERO.leading(), None);
        assert_eq!(Score(ScoreKind::MAX).checked_add(Score(1)), None);
    }
}
