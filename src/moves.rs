use serde::Serialize;

use crate::board::Board;
use crate::piece::{Piece, PieceKind};
use crate::position::{Direction, Position};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub fn rook_column(self) -> i32 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    fn king_direction(self) -> Direction {
        match self {
            CastleSide::Kingside => Direction::EAST,
            CastleSide::Queenside => Direction::WEST,
        }
    }
}

/// Variant tag of a move, for callers that only need to branch on it
/// (e.g. a shell prompting for the promotion piece).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum MoveKind {
    Normal,
    DoublePawn,
    EnPassant,
    CastleKingside,
    CastleQueenside,
    PawnPromotion,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(tag = "type")]
enum Detail {
    Normal,
    DoublePawn { skipped: Position },
    EnPassant { capture: Position },
    Castle { side: CastleSide },
    PawnPromotion { piece: PieceKind },
}

/// A move description. Moves are only produced by the engine's generators,
/// so a `Move` in hand always describes a geometrically valid candidate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Move {
    from: Position,
    to: Position,
    #[serde(flatten)]
    detail: Detail,
}

impl Move {
    pub(crate) fn normal(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            detail: Detail::Normal,
        }
    }

    pub(crate) fn double_pawn(from: Position, to: Position) -> Self {
        let skipped = Position::new((from.row + to.row) / 2, from.column);
        Move {
            from,
            to,
            detail: Detail::DoublePawn { skipped },
        }
    }

    pub(crate) fn en_passant(from: Position, to: Position) -> Self {
        let capture = Position::new(from.row, to.column);
        Move {
            from,
            to,
            detail: Detail::EnPassant { capture },
        }
    }

    pub(crate) fn castle(side: CastleSide, king_pos: Position) -> Self {
        let to = king_pos + 2 * side.king_direction();
        Move {
            from: king_pos,
            to,
            detail: Detail::Castle { side },
        }
    }

    pub(crate) fn pawn_promotion(from: Position, to: Position, piece: PieceKind) -> Self {
        Move {
            from,
            to,
            detail: Detail::PawnPromotion { piece },
        }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn kind(&self) -> MoveKind {
        match self.detail {
            Detail::Normal => MoveKind::Normal,
            Detail::DoublePawn { .. } => MoveKind::DoublePawn,
            Detail::EnPassant { .. } => MoveKind::EnPassant,
            Detail::Castle {
                side: CastleSide::Kingside,
            } => MoveKind::CastleKingside,
            Detail::Castle {
                side: CastleSide::Queenside,
            } => MoveKind::CastleQueenside,
            Detail::PawnPromotion { .. } => MoveKind::PawnPromotion,
        }
    }

    /// The piece a promotion produces, `None` for every other move.
    pub fn promotion(&self) -> Option<PieceKind> {
        match self.detail {
            Detail::PawnPromotion { piece } => Some(piece),
            _ => None,
        }
    }

    /// The same promotion carrying a different piece choice. Kings and pawns
    /// are not valid choices and fall back to a queen. Non-promotion moves
    /// are returned unchanged.
    pub fn promoting_to(self, piece: PieceKind) -> Move {
        match self.detail {
            Detail::PawnPromotion { .. } => Move::pawn_promotion(self.from, self.to, piece),
            _ => self,
        }
    }

    /// Every piece choice for a promotion; a single entry for other moves.
    pub fn promotion_choices(self) -> Vec<Move> {
        match self.detail {
            Detail::PawnPromotion { .. } => [
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Rook,
                PieceKind::Queen,
            ]
            .iter()
            .map(|&piece| self.promoting_to(piece))
            .collect(),
            _ => vec![self],
        }
    }

    /// Apply the move to `board`. Returns true when the move was a capture
    /// or a pawn move, which resets the fifty-move counter.
    pub fn execute(&self, board: &mut Board) -> bool {
        match self.detail {
            Detail::Normal => relocate(board, self.from, self.to),
            Detail::DoublePawn { skipped } => {
                if let Some(p) = board[self.from] {
                    board.set_pawn_skip_position(p.color(), Some(skipped));
                }
                relocate(board, self.from, self.to)
            }
            Detail::EnPassant { capture } => {
                relocate(board, self.from, self.to);
                board[capture] = None;
                true
            }
            Detail::Castle { side } => {
                let row = self.from.row;
                let rook_from = Position::new(row, side.rook_column());
                let rook_to = self.from + side.king_direction();
                relocate(board, self.from, self.to);
                relocate(board, rook_from, rook_to);
                false
            }
            Detail::PawnPromotion { piece } => {
                let Some(pawn) = board[self.from].take() else {
                    return false;
                };
                let kind = match piece {
                    PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook => piece,
                    _ => PieceKind::Queen,
                };
                board[self.to] = Some(Piece::new(kind, pawn.color()).with_moved(true));
                true
            }
        }
    }

    /// A move is legal when it does not leave the mover's own king in check.
    /// Castling additionally may not start in check or cross an attacked
    /// square.
    pub fn is_legal(&self, board: &Board) -> bool {
        let Some(player) = board[self.from].map(|p| p.color()) else {
            return false;
        };

        if let Detail::Castle { side } = self.detail {
            if board.is_in_check(player) {
                return false;
            }
            let dir = side.king_direction();
            let mut copy = board.clone();
            let mut king_pos = self.from;
            for _ in 0..2 {
                relocate(&mut copy, king_pos, king_pos + dir);
                king_pos += dir;
                if copy.is_in_check(player) {
                    return false;
                }
            }
            return true;
        }

        let mut copy = board.clone();
        self.execute(&mut copy);
        !copy.is_in_check(player)
    }
}

/// Plain relocation shared by every move variant.
fn relocate(board: &mut Board, from: Position, to: Position) -> bool {
    let Some(mut piece) = board[from].take() else {
        return false;
    };
    let captured = board[to].is_some();
    piece.mark_moved();
    board[to] = Some(piece);
    captured || piece.kind() == PieceKind::Pawn
}
