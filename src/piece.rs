use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::moves::{CastleSide, Move};
use crate::position::{Direction, Position};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Direction this player's pawns advance in.
    pub fn forward(self) -> Direction {
        match self {
            Player::White => Direction::NORTH,
            Player::Black => Direction::SOUTH,
        }
    }

    /// Row of this player's king and rooks at the start of the game.
    pub fn home_row(self) -> i32 {
        match self {
            Player::White => 7,
            Player::Black => 0,
        }
    }

    /// Row this player's pawns start on.
    pub fn pawn_row(self) -> i32 {
        match self {
            Player::White => 6,
            Player::Black => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
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

    pub(crate) fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter used by the fingerprint and FEN.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        let c = c.to_ascii_lowercase();
        PieceKind::ALL.into_iter().find(|kind| kind.letter() == c)
    }
}

const ROOK_DIRS: [Direction; 4] = [
    Direction::NORTH,
    Direction::SOUTH,
    Direction::EAST,
    Direction::WEST,
];

const BISHOP_DIRS: [Direction; 4] = [
    Direction::NORTH_WEST,
    Direction::NORTH_EAST,
    Direction::SOUTH_WEST,
    Direction::SOUTH_EAST,
];

const ALL_DIRS: [Direction; 8] = [
    Direction::NORTH,
    Direction::SOUTH,
    Direction::EAST,
    Direction::WEST,
    Direction::NORTH_WEST,
    Direction::NORTH_EAST,
    Direction::SOUTH_WEST,
    Direction::SOUTH_EAST,
];

const KNIGHT_OFFSETS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-1, -2),
    Direction::new(-2, 1),
    Direction::new(-1, 2),
    Direction::new(2, -1),
    Direction::new(1, -2),
    Direction::new(2, 1),
    Direction::new(1, 2),
];

/// A chess piece. Its square is implied by its slot on the `Board`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    color: Player,
    has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Player) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Same piece with the moved flag overridden. Used when setting up
    /// positions that did not arise from play.
    pub fn with_moved(mut self, has_moved: bool) -> Self {
        self.has_moved = has_moved;
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// Fingerprint/FEN letter: uppercase for White.
    pub fn letter(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Player::White => c.to_ascii_uppercase(),
            Player::Black => c,
        }
    }

    /// Pseudo-legal candidates from `from`. King safety is not checked here.
    pub fn get_moves(&self, from: Position, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(from, board, &mut moves),
            PieceKind::Knight => self.knight_moves(from, board, &mut moves),
            PieceKind::Bishop => self.sliding_moves(from, board, &BISHOP_DIRS, &mut moves),
            PieceKind::Rook => self.sliding_moves(from, board, &ROOK_DIRS, &mut moves),
            PieceKind::Queen => self.sliding_moves(from, board, &ALL_DIRS, &mut moves),
            PieceKind::King => self.king_moves(from, board, &mut moves),
        }
        moves
    }

    /// Whether this piece, standing on `from`, attacks the enemy king.
    ///
    /// Pawns and kings look at their attack squares directly; a king's
    /// candidate list includes castling, which itself consults the board.
    pub fn can_capture_opponent_king(&self, from: Position, board: &Board) -> bool {
        match self.kind {
            PieceKind::Pawn => [Direction::WEST, Direction::EAST]
                .iter()
                .any(|&dir| self.is_enemy_king(from + self.color.forward() + dir, board)),
            PieceKind::King => ALL_DIRS
                .iter()
                .any(|&dir| self.is_enemy_king(from + dir, board)),
            _ => self
                .get_moves(from, board)
                .iter()
                .any(|mv| board[mv.to()].map_or(false, |p| p.kind == PieceKind::King)),
        }
    }

    fn is_enemy_king(&self, pos: Position, board: &Board) -> bool {
        Board::is_inside(pos)
            && board[pos].map_or(false, |p| p.kind == PieceKind::King && p.color != self.color)
    }

    fn can_land_on(&self, pos: Position, board: &Board) -> bool {
        Board::is_inside(pos) && board[pos].map_or(true, |p| p.color != self.color)
    }

    fn sliding_moves(
        &self,
        from: Position,
        board: &Board,
        dirs: &[Direction],
        moves: &mut Vec<Move>,
    ) {
        for &dir in dirs {
            let mut pos = from + dir;
            while Board::is_inside(pos) {
                match board[pos] {
                    None => moves.push(Move::normal(from, pos)),
                    Some(p) => {
                        if p.color != self.color {
                            moves.push(Move::normal(from, pos));
                        }
                        break;
                    }
                }
                pos += dir;
            }
        }
    }

    fn knight_moves(&self, from: Position, board: &Board, moves: &mut Vec<Move>) {
        for &offset in &KNIGHT_OFFSETS {
            let to = from + offset;
            if self.can_land_on(to, board) {
                moves.push(Move::normal(from, to));
            }
        }
    }

    fn king_moves(&self, from: Position, board: &Board, moves: &mut Vec<Move>) {
        for &dir in &ALL_DIRS {
            let to = from + dir;
            if self.can_land_on(to, board) {
                moves.push(Move::normal(from, to));
            }
        }

        if self.has_moved {
            return;
        }
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if self.can_castle(side, from, board) {
                moves.push(Move::castle(side, from));
            }
        }
    }

    fn can_castle(&self, side: CastleSide, from: Position, board: &Board) -> bool {
        let home_row = self.color.home_row();
        if from != Position::new(home_row, 4) {
            return false;
        }
        let rook_pos = Position::new(home_row, side.rook_column());
        let unmoved_rook = board.piece_at(rook_pos).map_or(false, |p| {
            p.kind == PieceKind::Rook && p.color == self.color && !p.has_moved
        });
        if !unmoved_rook {
            return false;
        }
        let (lo, hi) = if rook_pos.column < from.column {
            (rook_pos.column + 1, from.column)
        } else {
            (from.column + 1, rook_pos.column)
        };
        (lo..hi).all(|column| board.is_empty(Position::new(from.row, column)))
    }

    fn pawn_moves(&self, from: Position, board: &Board, moves: &mut Vec<Move>) {
        let forward = self.color.forward();

        // Pushes
        let one = from + forward;
        if Board::is_inside(one) && board.is_empty(one) {
            Self::push_pawn_move(from, one, moves);

            let two = one + forward;
            if !self.has_moved
                && from.row == self.color.pawn_row()
                && Board::is_inside(two)
                && board.is_empty(two)
            {
                moves.push(Move::double_pawn(from, two));
            }
        }

        // Captures, including en passant
        let skip = board.pawn_skip_position(self.color.opponent());
        for side in [Direction::WEST, Direction::EAST] {
            let to = one + side;
            if !Board::is_inside(to) {
                continue;
            }
            if Some(to) == skip {
                moves.push(Move::en_passant(from, to));
            } else if board[to].map_or(false, |p| p.color != self.color) {
                Self::push_pawn_move(from, to, moves);
            }
        }
    }

    fn push_pawn_move(from: Position, to: Position, moves: &mut Vec<Move>) {
        if to.row == 0 || to.row == 7 {
            moves.push(Move::pawn_promotion(from, to, PieceKind::Queen));
        } else {
            moves.push(Move::normal(from, to));
        }
    }
}
