//! Canonical text key for a game position, used for repetition counting.
//!
//! The layout follows the first four FEN fields: piece placement from row 0
//! (rank 8) down, side to move, castling rights and the en passant target.
//! The en passant field is only filled in when the side to move actually
//! has a legal en passant capture.

use crate::board::Board;
use crate::piece::Player;
use crate::position::Position;

pub fn fingerprint(board: &Board, current_player: Player) -> String {
    let mut out = String::with_capacity(72);
    push_piece_placement(&mut out, board);
    out.push(' ');
    out.push(match current_player {
        Player::White => 'w',
        Player::Black => 'b',
    });
    out.push(' ');
    push_castling_rights(&mut out, board);
    out.push(' ');
    push_en_passant(&mut out, board, current_player);
    out
}

fn push_piece_placement(out: &mut String, board: &Board) {
    for row in 0..8 {
        if row != 0 {
            out.push('/');
        }
        let mut empty = 0;
        for col in 0..8 {
            match board[Position::new(row, col)] {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.letter());
                }
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
}

fn push_castling_rights(out: &mut String, board: &Board) {
    let rights = [
        (board.castle_right_ks(Player::White), 'K'),
        (board.castle_right_qs(Player::White), 'Q'),
        (board.castle_right_ks(Player::Black), 'k'),
        (board.castle_right_qs(Player::Black), 'q'),
    ];
    let before = out.len();
    for (available, c) in rights {
        if available {
            out.push(c);
        }
    }
    if out.len() == before {
        out.push('-');
    }
}

fn push_en_passant(out: &mut String, board: &Board, current_player: Player) {
    match board.pawn_skip_position(current_player.opponent()) {
        Some(skip) if board.can_capture_en_passant(current_player) => {
            out.push_str(&skip.to_string());
        }
        _ => out.push('-'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceKind};

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn initial_position() {
        assert_eq!(
            fingerprint(&Board::initial(), Player::White),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }

    #[test]
    fn empty_runs_and_no_rights() {
        let mut board = Board::empty();
        board[sq("h1")] = Some(Piece::new(PieceKind::King, Player::White));
        board[sq("a8")] = Some(Piece::new(PieceKind::King, Player::Black));
        board[sq("d5")] = Some(Piece::new(PieceKind::Queen, Player::Black));
        assert_eq!(fingerprint(&board, Player::Black), "k7/8/8/3q4/8/8/8/7K b - -");
    }

    #[test]
    fn partial_castling_rights_keep_fixed_order() {
        let mut board = Board::initial();
        if let Some(p) = board[sq("h1")].as_mut() {
            p.mark_moved();
        }
        board[sq("a8")] = None;
        let fp = fingerprint(&board, Player::White);
        assert!(fp.ends_with(" w Qk -"), "{fp}");
    }

    #[test]
    fn en_passant_square_only_when_capturable() {
        let mut board = Board::empty();
        board[sq("e1")] = Some(Piece::new(PieceKind::King, Player::White));
        board[sq("e8")] = Some(Piece::new(PieceKind::King, Player::Black));
        board[sq("e4")] = Some(Piece::new(PieceKind::Pawn, Player::White).with_moved(true));
        board.set_pawn_skip_position(Player::White, Some(sq("e3")));
        assert!(fingerprint(&board, Player::Black).ends_with(" b - -"));

        board[sq("f4")] = Some(Piece::new(PieceKind::Pawn, Player::Black).with_moved(true));
        assert!(fingerprint(&board, Player::Black).ends_with(" b - e3"));
    }
}
