use std::ops::{Index, IndexMut};

use crate::moves::{Move, MoveKind};
use crate::piece::{Piece, PieceKind, Player};
use crate::position::{Direction, Position};

/// Per-colour, per-kind tally of the pieces on a board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counting {
    counts: [[usize; 6]; 2],
    total: usize,
}

impl Counting {
    pub fn increment(&mut self, color: Player, kind: PieceKind) {
        self.counts[color.index()][kind.index()] += 1;
        self.total += 1;
    }

    pub fn white(&self, kind: PieceKind) -> usize {
        self.counts[Player::White.index()][kind.index()]
    }

    pub fn black(&self, kind: PieceKind) -> usize {
        self.counts[Player::Black.index()][kind.index()]
    }

    pub fn total_count(&self) -> usize {
        self.total
    }
}

/// The 8x8 grid plus the square each player's pawn skipped over on its most
/// recent double step. Cloning a board yields a fully independent copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pawn_skip_positions: [Option<Position>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    fn index(&self, pos: Position) -> &Option<Piece> {
        &self.squares[pos.row as usize][pos.column as usize]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Option<Piece> {
        &mut self.squares[pos.row as usize][pos.column as usize]
    }
}

impl Index<(usize, usize)> for Board {
    type Output = Option<Piece>;

    fn index(&self, (row, col): (usize, usize)) -> &Option<Piece> {
        &self.squares[row][col]
    }
}

impl IndexMut<(usize, usize)> for Board {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Option<Piece> {
        &mut self.squares[row][col]
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            pawn_skip_positions: [None; 2],
        }
    }

    /// The standard starting arrangement. Black occupies rows 0-1, White rows 6-7.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for player in [Player::White, Player::Black] {
            let home = player.home_row() as usize;
            let pawns = player.pawn_row() as usize;
            for (col, &kind) in back_rank.iter().enumerate() {
                board.squares[home][col] = Some(Piece::new(kind, player));
                board.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, player));
            }
        }
        board
    }

    pub fn is_inside(pos: Position) -> bool {
        (0..8).contains(&pos.row) && (0..8).contains(&pos.column)
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self[pos].is_none()
    }

    /// Bounds-checked read, `None` for empty or off-board squares.
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        if Self::is_inside(pos) {
            self[pos].as_ref()
        } else {
            None
        }
    }

    pub fn pawn_skip_position(&self, player: Player) -> Option<Position> {
        self.pawn_skip_positions[player.index()]
    }

    pub fn set_pawn_skip_position(&mut self, player: Player, pos: Option<Position>) {
        self.pawn_skip_positions[player.index()] = pos;
    }

    /// Occupied squares in row-major order.
    pub fn piece_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..8)
            .flat_map(|row| (0..8).map(move |col| Position::new(row, col)))
            .filter(move |&pos| !self.is_empty(pos))
    }

    pub fn pieces_positions_for(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        self.piece_positions()
            .filter(move |&pos| self[pos].map_or(false, |p| p.color() == player))
    }

    pub fn find_piece(&self, player: Player, kind: PieceKind) -> Option<Position> {
        self.pieces_positions_for(player)
            .find(|&pos| self[pos].map_or(false, |p| p.kind() == kind))
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        self.pieces_positions_for(player.opponent()).any(|pos| {
            self[pos].map_or(false, |p| p.can_capture_opponent_king(pos, self))
        })
    }

    /// Every pseudo-legal candidate for `player` that survives the legality test.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        self.pieces_positions_for(player)
            .flat_map(|pos| match self[pos] {
                Some(piece) => piece.get_moves(pos, self),
                None => Vec::new(),
            })
            .filter(|mv| mv.is_legal(self))
            .collect()
    }

    pub fn count_pieces(&self) -> Counting {
        let mut counting = Counting::default();
        for pos in self.piece_positions() {
            if let Some(p) = self[pos] {
                counting.increment(p.color(), p.kind());
            }
        }
        counting
    }

    /// Material from which neither side can force mate: K v K, K+B v K,
    /// K+N v K, and K+B v K+B with both bishops on the same square colour.
    /// Opposite-coloured bishops are not treated as a draw.
    pub fn insufficient_material(&self) -> bool {
        let counting = self.count_pieces();
        Self::is_king_v_king(&counting)
            || Self::is_king_bishop_v_king(&counting)
            || Self::is_king_knight_v_king(&counting)
            || self.is_king_bishop_v_king_bishop(&counting)
    }

    fn is_king_v_king(counting: &Counting) -> bool {
        counting.total_count() == 2
    }

    fn is_king_bishop_v_king(counting: &Counting) -> bool {
        counting.total_count() == 3
            && (counting.white(PieceKind::Bishop) == 1 || counting.black(PieceKind::Bishop) == 1)
    }

    fn is_king_knight_v_king(counting: &Counting) -> bool {
        counting.total_count() == 3
            && (counting.white(PieceKind::Knight) == 1 || counting.black(PieceKind::Knight) == 1)
    }

    fn is_king_bishop_v_king_bishop(&self, counting: &Counting) -> bool {
        if counting.total_count() != 4
            || counting.white(PieceKind::Bishop) != 1
            || counting.black(PieceKind::Bishop) != 1
        {
            return false;
        }
        match (
            self.find_piece(Player::White, PieceKind::Bishop),
            self.find_piece(Player::Black, PieceKind::Bishop),
        ) {
            (Some(w), Some(b)) => w.square_color() == b.square_color(),
            _ => false,
        }
    }

    fn is_unmoved_king_and_rook(&self, king_pos: Position, rook_pos: Position) -> bool {
        match (self[king_pos], self[rook_pos]) {
            (Some(king), Some(rook)) => {
                king.kind() == PieceKind::King
                    && rook.kind() == PieceKind::Rook
                    && !king.has_moved()
                    && !rook.has_moved()
            }
            _ => false,
        }
    }

    /// Kingside castling right: an unmoved king and rook on their home squares.
    /// Only the current occupants are inspected.
    pub fn castle_right_ks(&self, player: Player) -> bool {
        let row = player.home_row();
        self.is_unmoved_king_and_rook(Position::new(row, 4), Position::new(row, 7))
    }

    pub fn castle_right_qs(&self, player: Player) -> bool {
        let row = player.home_row();
        self.is_unmoved_king_and_rook(Position::new(row, 4), Position::new(row, 0))
    }

    /// Whether `player` has a pawn that can legally capture en passant onto
    /// the square the opponent's pawn just skipped.
    pub fn can_capture_en_passant(&self, player: Player) -> bool {
        let Some(skip) = self.pawn_skip_position(player.opponent()) else {
            return false;
        };
        // Pawns capture toward `forward`, so a capturer sits one row behind.
        let behind = skip + -1 * player.forward();
        [behind + Direction::WEST, behind + Direction::EAST]
            .into_iter()
            .filter(|&pos| Self::is_inside(pos))
            .any(|pos| self.has_en_passant_capture(player, pos, skip))
    }

    fn has_en_passant_capture(&self, player: Player, from: Position, skip: Position) -> bool {
        let Some(piece) = self[from] else {
            return false;
        };
        if piece.color() != player || piece.kind() != PieceKind::Pawn {
            return false;
        }
        piece
            .get_moves(from, self)
            .into_iter()
            .any(|mv| mv.kind() == MoveKind::EnPassant && mv.to() == skip && mv.is_legal(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn place(board: &mut Board, s: &str, kind: PieceKind, color: Player) {
        board[sq(s)] = Some(Piece::new(kind, color));
    }

    #[test]
    fn initial_board_has_sixteen_pieces_per_side() {
        let board = Board::initial();
        assert_eq!(board.pieces_positions_for(Player::White).count(), 16);
        assert_eq!(board.pieces_positions_for(Player::Black).count(), 16);
        assert_eq!(board[sq("e1")].unwrap().kind(), PieceKind::King);
        assert_eq!(board[sq("d8")].unwrap().kind(), PieceKind::Queen);
        assert_eq!(board[(7, 0)].unwrap().kind(), PieceKind::Rook);
        assert_eq!(board[sq("a2")].unwrap().color(), Player::White);
        assert!(board.castle_right_ks(Player::White));
        assert!(board.castle_right_qs(Player::Black));
    }

    #[test]
    fn piece_positions_are_row_major_and_restartable() {
        let mut board = Board::empty();
        place(&mut board, "h1", PieceKind::King, Player::White);
        place(&mut board, "a8", PieceKind::King, Player::Black);
        place(&mut board, "c8", PieceKind::Rook, Player::Black);
        let first: Vec<Position> = board.piece_positions().collect();
        assert_eq!(first, vec![sq("a8"), sq("c8"), sq("h1")]);
        let second: Vec<Position> = board.piece_positions().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn piece_at_is_total() {
        let board = Board::initial();
        assert!(board.piece_at(Position::new(-1, 3)).is_none());
        assert!(board.piece_at(Position::new(3, 8)).is_none());
        assert!(board.piece_at(sq("e4")).is_none());
        assert!(board.piece_at(sq("e2")).is_some());
    }

    #[test]
    fn clone_is_independent() {
        let board = Board::initial();
        let mut copy = board.clone();
        copy[sq("e2")] = None;
        copy.set_pawn_skip_position(Player::White, Some(sq("e3")));
        if let Some(p) = copy[sq("g1")].as_mut() {
            p.mark_moved();
        }
        assert!(board[sq("e2")].is_some());
        assert_eq!(board.pawn_skip_position(Player::White), None);
        assert!(!board[sq("g1")].unwrap().has_moved());
    }

    #[test]
    fn detects_check_from_each_attacker() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Player::White);
        place(&mut board, "e8", PieceKind::King, Player::Black);
        assert!(!board.is_in_check(Player::White));

        place(&mut board, "f3", PieceKind::Knight, Player::Black);
        assert!(board.is_in_check(Player::White));
        board[sq("f3")] = None;

        place(&mut board, "d2", PieceKind::Pawn, Player::Black);
        assert!(board.is_in_check(Player::White));
        board[sq("d2")] = None;

        place(&mut board, "a5", PieceKind::Queen, Player::Black);
        assert!(board.is_in_check(Player::White));
        place(&mut board, "c3", PieceKind::Pawn, Player::White);
        assert!(!board.is_in_check(Player::White));
    }

    #[test]
    fn lone_kings_and_single_minor_are_insufficient() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Player::White);
        place(&mut board, "e8", PieceKind::King, Player::Black);
        assert!(board.insufficient_material());

        place(&mut board, "c1", PieceKind::Bishop, Player::White);
        assert!(board.insufficient_material());

        board[sq("c1")] = None;
        place(&mut board, "g8", PieceKind::Knight, Player::Black);
        assert!(board.insufficient_material());

        place(&mut board, "a2", PieceKind::Pawn, Player::White);
        assert!(!board.insufficient_material());
    }

    #[test]
    fn same_colored_bishops_are_insufficient_opposite_are_not() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Player::White);
        place(&mut board, "e8", PieceKind::King, Player::Black);
        place(&mut board, "c1", PieceKind::Bishop, Player::White);
        place(&mut board, "f8", PieceKind::Bishop, Player::Black);
        assert!(board.insufficient_material());

        board[sq("f8")] = None;
        place(&mut board, "c8", PieceKind::Bishop, Player::Black);
        assert!(!board.insufficient_material());
    }

    #[test]
    fn two_knights_are_not_flagged() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Player::White);
        place(&mut board, "e8", PieceKind::King, Player::Black);
        place(&mut board, "b1", PieceKind::Knight, Player::White);
        place(&mut board, "g1", PieceKind::Knight, Player::White);
        assert!(!board.insufficient_material());
    }

    #[test]
    fn castling_rights_follow_home_square_occupants() {
        let mut board = Board::initial();
        assert!(board.castle_right_ks(Player::Black));

        if let Some(p) = board[sq("h8")].as_mut() {
            p.mark_moved();
        }
        assert!(!board.castle_right_ks(Player::Black));
        assert!(board.castle_right_qs(Player::Black));

        board[sq("a1")] = None;
        assert!(!board.castle_right_qs(Player::White));
        assert!(board.castle_right_ks(Player::White));
    }

    #[test]
    fn en_passant_needs_adjacent_pawn_and_skip() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Player::White);
        place(&mut board, "e8", PieceKind::King, Player::Black);
        board[sq("e4")] = Some(Piece::new(PieceKind::Pawn, Player::White).with_moved(true));
        board[sq("d4")] = Some(Piece::new(PieceKind::Pawn, Player::Black).with_moved(true));
        assert!(!board.can_capture_en_passant(Player::Black));

        board.set_pawn_skip_position(Player::White, Some(sq("e3")));
        assert!(board.can_capture_en_passant(Player::Black));
        assert!(!board.can_capture_en_passant(Player::White));
    }

    #[test]
    fn en_passant_that_exposes_king_does_not_count() {
        // Capturing would clear the fourth rank between the rook and king.
        let mut board = Board::empty();
        place(&mut board, "h4", PieceKind::King, Player::Black);
        place(&mut board, "a4", PieceKind::Rook, Player::White);
        place(&mut board, "e1", PieceKind::King, Player::White);
        board[sq("e4")] = Some(Piece::new(PieceKind::Pawn, Player::White).with_moved(true));
        board[sq("d4")] = Some(Piece::new(PieceKind::Pawn, Player::Black).with_moved(true));
        board.set_pawn_skip_position(Player::White, Some(sq("e3")));
        assert!(!board.can_capture_en_passant(Player::Black));
    }
}
