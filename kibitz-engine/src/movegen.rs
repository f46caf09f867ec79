//! Functions and constants used to help with generating moves for a position.
//!
//! Generation is square-centric: pieces are visited from a1 to h8 and each
//! piece's targets are produced in a fixed direction order, so the same
//! position always yields the same move order.

use crate::coretypes::{Castling, Color, Move, Piece, PieceKind, Square, MAX_MOVES};
use crate::mailbox::Mailbox;

/// (file, rank) steps of a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
/// (file, rank) steps of a king.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
/// North, East, South, West rays.
pub const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
/// North-East, South-East, South-West, North-West rays.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_attacked(board: &Mailbox, target: Square, by: Color) -> bool {
    let holds = |square: Option<Square>, kind: PieceKind| {
        square.and_then(|sq| board[sq]) == Some(Piece::new(by, kind))
    };

    // A pawn of `by` attacks target if it sits one rank behind target, from by's view.
    let pawn_rank = -by.forward();
    if holds(target.offset(-1, pawn_rank), PieceKind::Pawn)
        || holds(target.offset(1, pawn_rank), PieceKind::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), PieceKind::King))
    {
        return true;
    }

    let slider_hits = |rays: &[(i8, i8)], kind: PieceKind| {
        rays.iter().any(|&(df, dr)| {
            match first_blocker(board, target, df, dr) {
                Some(piece) => {
                    piece.color() == by
                        && (piece.piece_kind() == kind || piece.piece_kind() == PieceKind::Queen)
                }
                None => false,
            }
        })
    };

    slider_hits(&ORTHOGONAL, PieceKind::Rook) || slider_hits(&DIAGONAL, PieceKind::Bishop)
}

/// The first piece met when walking from `origin` in one direction.
fn first_blocker(board: &Mailbox, origin: Square, df: i8, dr: i8) -> Option<Piece> {
    let mut square = origin.offset(df, dr);
    while let Some(sq) = square {
        if let Some(piece) = board[sq] {
            return Some(piece);
        }
        square = sq.offset(df, dr);
    }
    None
}

/// Generate every pseudo-legal move for `player`. Moves may leave the mover's
/// king in check, with the exception of castling, which is fully checked here.
/// The list is unbounded: counting moves that leave the king in check, it can go
/// past `MAX_MOVES`.
pub fn pseudo_legal_moves(
    board: &Mailbox,
    player: Color,
    castling: Castling,
    en_passant: Option<Square>,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(MAX_MOVES);

    for (from, piece) in board.pieces() {
        if piece.color() != player {
            continue;
        }
        match piece.piece_kind() {
            PieceKind::Pawn => pawn_moves(board, from, player, en_passant, &mut moves),
            PieceKind::Knight => step_moves(board, from, player, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => slide_moves(board, from, player, &DIAGONAL, &mut moves),
            PieceKind::Rook => slide_moves(board, from, player, &ORTHOGONAL, &mut moves),
            PieceKind::Queen => {
                slide_moves(board, from, player, &ORTHOGONAL, &mut moves);
                slide_moves(board, from, player, &DIAGONAL, &mut moves);
            }
            PieceKind::King => {
                step_moves(board, from, player, &KING_OFFSETS, &mut moves);
                castling_moves(board, from, player, castling, &mut moves);
            }
        }
    }

    moves
}

fn pawn_moves(
    board: &Mailbox,
    from: Square,
    player: Color,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let forward = player.forward();
    let promotes_on = match player {
        Color::White => 7,
        Color::Black => 0,
    };
    let mut push_pawn = |to: Square| {
        if to.rank() == promotes_on {
            for promotion in PieceKind::PROMOTIONS {
                moves.push(Move::new(from, to, Some(promotion)));
            }
        } else {
            moves.push(Move::new(from, to, None));
        }
    };

    if let Some(single) = from.offset(0, forward) {
        if board[single].is_none() {
            push_pawn(single);
            if from.rank() == player.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if board[double].is_none() {
                        push_pawn(double);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(target) = from.offset(df, forward) {
            let is_capture = matches!(board[target], Some(piece) if piece.color() != player);
            if is_capture || en_passant == Some(target) {
                push_pawn(target);
            }
        }
    }
}

fn step_moves(
    board: &Mailbox,
    from: Square,
    player: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            match board[to] {
                Some(piece) if piece.color() == player => (),
                _ => moves.push(Move::new(from, to, None)),
            }
        }
    }
}

fn slide_moves(
    board: &Mailbox,
    from: Square,
    player: Color,
    rays: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in rays {
        let mut square = from.offset(df, dr);
        while let Some(to) = square {
            match board[to] {
                None => moves.push(Move::new(from, to, None)),
                Some(piece) => {
                    if piece.color() != player {
                        moves.push(Move::new(from, to, None));
                    }
                    break;
                }
            }
            square = to.offset(df, dr);
        }
    }
}

/// Castling requires the right, an unmoved rook, empty squares between king and
/// rook, and a king that neither starts in, passes through, nor lands in check.
fn castling_moves(
    board: &Mailbox,
    from: Square,
    player: Color,
    castling: Castling,
    moves: &mut Vec<Move>,
) {
    let (king_side, queen_side, home) = match player {
        Color::White => (Castling::W_KING, Castling::W_QUEEN, Square::E1),
        Color::Black => (Castling::B_KING, Castling::B_QUEEN, Square::E8),
    };
    if from != home || is_attacked(board, home, !player) {
        return;
    }
    let rank = home.rank();
    let rook = Some(Piece::new(player, PieceKind::Rook));
    let empty = |files: &[u8]| {
        files
            .iter()
            .all(|&file| Square::new(file, rank).map_or(false, |sq| board[sq].is_none()))
    };
    let safe = |files: &[u8]| {
        files.iter().all(|&file| {
            Square::new(file, rank).map_or(false, |sq| !is_attacked(board, sq, !player))
        })
    };

    if castling.has(king_side)
        && Square::new(7, rank).and_then(|sq| board[sq]) == rook
        && empty(&[5, 6])
        && safe(&[5, 6])
    {
        if let Some(to) = Square::new(6, rank) {
            moves.push(Move::new(from, to, None));
        }
    }
    if castling.has(queen_side)
        && Square::new(0, rank).and_then(|sq| board[sq]) == rook
        && empty(&[1, 2, 3])
        && safe(&[2, 3])
    {
        if let Some(to) = Square::new(2, rank) {
            moves.push(Move::new(from, to, None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn start_position_pseudo_moves() {
        let board = Mailbox::start_position();
        let white = pseudo_legal_moves(&board, Color::White, Castling::ALL, None);
        let black = pseudo_legal_moves(&board, Color::Black, Castling::ALL, None);
        assert_eq!(white.len(), 20);
        assert_eq!(black.len(), 20);
        // Pieces are visited from a1 upwards, so the b1 knight comes first.
        assert_eq!(white[0], Move::new(B1, C3, None));
        assert_eq!(black[0], Move::new(A7, A6, None));
    }

    #[test]
    fn attacks_by_each_piece_kind() {
        let mut board = Mailbox::new();
        board[E4] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        board[B1] = Some(Piece::new(Color::White, PieceKind::Knight));
        board[H8] = Some(Piece::new(Color::Black, PieceKind::Bishop));
        board[A5] = Some(Piece::new(Color::White, PieceKind::Rook));
        board[C5] = Some(Piece::new(Color::Black, PieceKind::Knight));

        // Black pawn on e4 attacks d3 and f3.
        assert!(is_attacked(&board, D3, Color::Black));
        assert!(is_attacked(&board, F3, Color::Black));
        assert!(!is_attacked(&board, E3, Color::Black));
        // Knight on b1.
        assert!(is_attacked(&board, C3, Color::White));
        assert!(is_attacked(&board, D2, Color::White));
        // Bishop on h8 sees down the long diagonal.
        assert!(is_attacked(&board, F6, Color::Black));
        // Rook on a5 is blocked by the knight on c5.
        assert!(is_attacked(&board, C5, Color::White));
        assert!(!is_attacked(&board, D5, Color::White));
    }

    #[test]
    fn promotions_generate_all_pieces() {
        let mut board = Mailbox::new();
        board[B7] = Some(Piece::new(Color::White, PieceKind::Pawn));
        board[A8] = Some(Piece::new(Color::Black, PieceKind::Rook));
        let moves = pseudo_legal_moves(&board, Color::White, Castling::NONE, None);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], Move::new(B7, B8, Some(PieceKind::Queen)));
        assert_eq!(moves[4], Move::new(B7, A8, Some(PieceKind::Queen)));
    }
}
