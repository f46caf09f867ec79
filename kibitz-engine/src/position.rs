//! Holds Position struct, the reference rules engine for the searcher.
//! Position represents a chess position and the moves that led to it.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::coretypes::{
    Castling, Color, Move, MoveCount, MoveKind, MoveList, Piece, PieceKind, Square,
};
use crate::error::{Error, RulesError};
use crate::fen::Fen;
use crate::mailbox::Mailbox;
use crate::movegen as mg;
use crate::rules::RulesEngine;

/// Rule set a position is played under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Variant {
    /// Standard chess.
    #[default]
    Standard,
    /// Standard chess, except that a king reaching d4, e4, d5 or e5 wins.
    KingOfTheHill,
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Standard => f.write_str("standard"),
            Variant::KingOfTheHill => f.write_str("kingofthehill"),
        }
    }
}

impl FromStr for Variant {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "chess" => Ok(Variant::Standard),
            "kingofthehill" | "koth" => Ok(Variant::KingOfTheHill),
            _ => Err(Error::Fen(format!("unknown variant {s:?}"))),
        }
    }
}

/// The reason a game has ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Checkmate { winner: Color },
    KingOfTheHill { winner: Color },
    InsufficientMaterial,
    Stalemate,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    /// Winning color, or None for a draw.
    pub const fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } | Outcome::KingOfTheHill { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Outcome::KingOfTheHill { winner } => write!(f, "{winner} wins by king of the hill"),
            Outcome::InsufficientMaterial => f.write_str("draw by insufficient material"),
            Outcome::Stalemate => f.write_str("draw by stalemate"),
            Outcome::SeventyFiveMoves => f.write_str("draw by the seventy-five move rule"),
            Outcome::FivefoldRepetition => f.write_str("draw by fivefold repetition"),
        }
    }
}

/// The parts of a position that decide whether two positions repeat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PositionKey {
    board: Mailbox,
    side_to_move: Color,
    castling: Castling,
    en_passant: Option<Square>,
}

/// MoveInfo records what a move changed, so that it can be undone.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveInfo {
    pub(crate) move_: Move,
    /// Kind of the piece that was moved, before any promotion.
    pub(crate) piece_kind: PieceKind,
    pub(crate) move_kind: MoveKind,
    /// State of the position before the move was made.
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) key: PositionKey,
}

impl MoveInfo {
    pub fn move_(&self) -> Move {
        self.move_
    }
    pub fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }
    pub fn move_kind(&self) -> MoveKind {
        self.move_kind
    }
}

/// struct Position
/// A complete data set that can represent any chess position.
/// # Members:
/// * board - a square-centric container of all pieces.
/// * side_to_move - Color of player whose turn it is.
/// * castling - Castling rights for both players.
/// * en_passant - Square a pawn may capture onto en passant, after a double push.
/// * halfmoves - Tracker for 50 move draw rule. Resets after capture/pawn move.
/// * fullmoves - Starts at 1, increments after each black player's move.
/// * variant - Rule set in play.
/// * history - Undo stack of every move applied since the position was created.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Position {
    pub(crate) board: Mailbox,
    pub(crate) side_to_move: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) fullmoves: MoveCount,
    pub(crate) variant: Variant,
    pub(crate) history: Vec<MoveInfo>,
}

impl Position {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        Self {
            board: Mailbox::start_position(),
            side_to_move: Color::White,
            castling: Castling::ALL,
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
            variant: Variant::Standard,
            history: Vec::new(),
        }
    }

    /// Same position played under another rule set.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Const getters.
    pub fn board(&self) -> &Mailbox {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> Castling {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
    pub fn fullmoves(&self) -> MoveCount {
        self.fullmoves
    }
    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn history(&self) -> &[MoveInfo] {
        &self.history
    }

    fn key(&self) -> PositionKey {
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    /// Moving piece and move kind for a move, or None if the side to move has
    /// no piece on the origin square.
    fn classify(&self, move_: Move) -> Option<(Piece, MoveKind)> {
        let piece = self.board[move_.from].filter(|p| p.color() == self.side_to_move)?;
        if matches!(self.board[move_.to], Some(p) if p.color() == self.side_to_move) {
            return None;
        }
        let file_distance = (move_.from.file() as i8 - move_.to.file() as i8).abs();

        let move_kind = match (piece.piece_kind(), self.board[move_.to]) {
            (PieceKind::King, None) if file_distance == 2 => MoveKind::Castle,
            (PieceKind::Pawn, None)
                if file_distance == 1 && self.en_passant == Some(move_.to) =>
            {
                MoveKind::EnPassant
            }
            (_, Some(captured)) => MoveKind::Capture(captured.piece_kind()),
            (_, None) => MoveKind::Quiet,
        };
        Some((piece, move_kind))
    }

    /// Move pieces on a board as the given move would.
    fn place(board: &mut Mailbox, move_: Move, piece: Piece, move_kind: MoveKind) {
        let (from, to) = (move_.from, move_.to);
        match move_kind {
            MoveKind::Castle => {
                let (rook_from, rook_to) = Self::castle_rook_squares(to);
                board[rook_to] = board[rook_from].take();
            }
            MoveKind::EnPassant => {
                if let Some(captured) = Square::new(to.file(), from.rank()) {
                    board[captured] = None;
                }
            }
            MoveKind::Quiet | MoveKind::Capture(_) => (),
        }
        board[from] = None;
        board[to] = Some(match move_.promotion {
            Some(promotion) => Piece::new(piece.color(), promotion),
            None => piece,
        });
    }

    /// Rook origin and destination for a king's castling destination.
    fn castle_rook_squares(king_to: Square) -> (Square, Square) {
        match king_to {
            Square::G1 => (Square::H1, Square::F1),
            Square::C1 => (Square::A1, Square::D1),
            Square::G8 => (Square::H8, Square::F8),
            _ => (Square::A8, Square::D8),
        }
    }

    /// True if a pseudo-legal move does not leave the mover's king attacked.
    fn is_pseudo_move_legal(&self, move_: Move) -> bool {
        let Some((piece, move_kind)) = self.classify(move_) else {
            return false;
        };
        let mut board = self.board;
        Self::place(&mut board, move_, piece, move_kind);

        match board.find(Piece::new(self.side_to_move, PieceKind::King)) {
            Some(king) => !mg::is_attacked(&board, king, !self.side_to_move),
            None => true,
        }
    }

    /// Returns a list of all legal moves for the side to move.
    pub fn get_legal_moves(&self) -> MoveList {
        mg::pseudo_legal_moves(&self.board, self.side_to_move, self.castling, self.en_passant)
            .into_iter()
            .filter(|&move_| self.is_pseudo_move_legal(move_))
            .collect()
    }

    fn has_legal_moves(&self) -> bool {
        mg::pseudo_legal_moves(&self.board, self.side_to_move, self.castling, self.en_passant)
            .into_iter()
            .any(|move_| self.is_pseudo_move_legal(move_))
    }

    /// Checks if given move is legal for current position.
    pub fn is_legal_move(&self, move_: Move) -> bool {
        self.get_legal_moves().contains(&move_)
    }

    /// Apply a move to self, in place.
    /// `do_move` does not check if the move is legal, only that the side to move
    /// has a piece on the origin square.
    pub fn do_move(&mut self, move_: Move) -> Result<(), RulesError> {
        let (piece, move_kind) = self
            .classify(move_)
            .ok_or_else(|| RulesError::IllegalMove(move_.to_string()))?;

        self.history.push(MoveInfo {
            move_,
            piece_kind: piece.piece_kind(),
            move_kind,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmoves: self.halfmoves,
            key: self.key(),
        });

        Self::place(&mut self.board, move_, piece, move_kind);

        if piece.piece_kind() == PieceKind::King {
            self.castling.clear_color(piece.color());
        }
        self.castling.clear(Castling::lost_on(move_.from));
        self.castling.clear(Castling::lost_on(move_.to));

        let rank_distance = (move_.from.rank() as i8 - move_.to.rank() as i8).abs();
        self.en_passant = match piece.piece_kind() {
            PieceKind::Pawn if rank_distance == 2 => move_.from.offset(0, piece.color().forward()),
            _ => None,
        };

        let is_capture = matches!(move_kind, MoveKind::Capture(_) | MoveKind::EnPassant);
        if piece.piece_kind() == PieceKind::Pawn || is_capture {
            self.halfmoves = 0;
        } else {
            self.halfmoves = self.halfmoves.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.side_to_move = !self.side_to_move;

        Ok(())
    }

    /// Checks if move is legal before applying it.
    pub fn do_legal_move(&mut self, move_: Move) -> Result<(), RulesError> {
        if !self.is_legal_move(move_) {
            return Err(RulesError::IllegalMove(move_.to_string()));
        }
        self.do_move(move_)
    }

    /// Undo the most recently applied move, in place, returning it.
    pub fn undo_move(&mut self) -> Result<Move, RulesError> {
        let info = self.history.pop().ok_or(RulesError::NothingToUndo)?;
        let mover = !self.side_to_move;
        let (from, to) = (info.move_.from, info.move_.to);

        match info.move_kind {
            MoveKind::Castle => {
                let (rook_from, rook_to) = Self::castle_rook_squares(to);
                self.board[rook_from] = self.board[rook_to].take();
                self.board[to] = None;
            }
            MoveKind::EnPassant => {
                self.board[to] = None;
                if let Some(captured) = Square::new(to.file(), from.rank()) {
                    self.board[captured] = Some(Piece::new(!mover, PieceKind::Pawn));
                }
            }
            MoveKind::Capture(piece_kind) => {
                self.board[to] = Some(Piece::new(!mover, piece_kind));
            }
            MoveKind::Quiet => {
                self.board[to] = None;
            }
        }
        self.board[from] = Some(Piece::new(mover, info.piece_kind));

        self.castling = info.castling;
        self.en_passant = info.en_passant;
        self.halfmoves = info.halfmoves;
        if mover == Color::Black {
            self.fullmoves = self.fullmoves.saturating_sub(1);
        }
        self.side_to_move = mover;

        Ok(info.move_)
    }

    /// Square of a color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.find(Piece::new(color, PieceKind::King))
    }

    /// Returns true if active player's king is in any check.
    pub fn is_in_check(&self) -> bool {
        self.king_square(self.side_to_move)
            .map_or(false, |king| mg::is_attacked(&self.board, king, !self.side_to_move))
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_moves()
    }

    /// Neither side can possibly deliver mate: bare kings, a single knight,
    /// or only bishops that all stand on the same square color.
    /// Never true in King of the Hill, where a bare king can still walk to the hill.
    pub fn is_insufficient_material(&self) -> bool {
        if self.variant == Variant::KingOfTheHill {
            return false;
        }
        let mut knights = 0;
        let mut bishops = 0;
        let (mut on_dark, mut on_light) = (false, false);

        for (square, piece) in self.board.pieces() {
            match piece.piece_kind() {
                PieceKind::King => (),
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishops += 1;
                    match square.is_dark() {
                        true => on_dark = true,
                        false => on_light = true,
                    }
                }
            }
        }

        match (knights, bishops) {
            (0, 0) | (1, 0) => true,
            (0, _) => !(on_dark && on_light),
            _ => false,
        }
    }

    /// 150 plies without a capture or pawn move.
    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmoves >= 150 && self.has_legal_moves()
    }

    /// The current position occurred at least four times before.
    pub fn is_fivefold_repetition(&self) -> bool {
        let current = self.key();
        let earlier = self
            .history
            .iter()
            .rev()
            .take(self.halfmoves as usize)
            .filter(|info| info.key == current)
            .count();
        earlier + 1 >= 5
    }

    /// Color of a king standing on the hill, when playing King of the Hill.
    fn king_on_hill(&self) -> Option<Color> {
        if self.variant != Variant::KingOfTheHill {
            return None;
        }
        // The side that just moved is the one that could have climbed the hill.
        [!self.side_to_move, self.side_to_move]
            .into_iter()
            .find(|&color| self.king_square(color).map_or(false, |sq| sq.is_center()))
    }

    /// Returns the result of the game, or None if it is still in progress.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(winner) = self.king_on_hill() {
            return Some(Outcome::KingOfTheHill { winner });
        }
        let has_moves = self.has_legal_moves();
        if !has_moves && self.is_in_check() {
            return Some(Outcome::Checkmate {
                winner: !self.side_to_move,
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if !has_moves {
            return Some(Outcome::Stalemate);
        }
        if self.is_seventyfive_moves() {
            return Some(Outcome::SeventyFiveMoves);
        }
        if self.is_fivefold_repetition() {
            return Some(Outcome::FivefoldRepetition);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Mirror the position so that White and Black trade places.
    /// The history of the mirrored position is empty.
    pub fn color_flip(&self) -> Self {
        Self {
            board: self.board.color_flip(),
            side_to_move: !self.side_to_move,
            castling: self.castling.color_flip(),
            en_passant: self.en_passant.map(|sq| sq.flip_rank()),
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
            variant: self.variant,
            history: Vec::new(),
        }
    }
}

impl RulesEngine for Position {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn legal_moves(&self) -> MoveList {
        self.get_legal_moves()
    }

    fn apply(&mut self, move_: Move) -> Result<(), RulesError> {
        self.do_move(move_)
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        self.undo_move().map(|_| ())
    }

    fn is_game_over(&self) -> bool {
        Position::is_game_over(self)
    }

    fn is_variant_end(&self) -> bool {
        self.king_on_hill().is_some()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square]
    }

    fn king_square(&self, color: Color) -> Option<Square> {
        Position::king_square(self, color)
    }
}

/// Defaults to standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Displays pretty-printed chess board and Fen string representing Position.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n Fen: {}\n", self.board, self.to_fen())
    }
}
