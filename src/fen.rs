//! FEN loading: piece placement, side to move, castling rights, en passant
//! target and the optional half-move clock. The full-move number is ignored.
//!
//! The board tracks castling through "has moved" flags, so castling rights
//! are translated into flags: a king or corner rook counts as unmoved only
//! when a right that needs it is listed. Pawns count as unmoved on their
//! starting row.

use crate::board::Board;
use crate::config::RulesConfig;
use crate::error::ChessError;
use crate::game::GameState;
use crate::piece::{Piece, PieceKind, Player};
use crate::position::Position;

/// The parts of a FEN record this engine keeps.
#[derive(Clone, Debug)]
pub struct FenPosition {
    pub board: Board,
    pub side_to_move: Player,
    pub half_move_clock: u32,
}

pub fn parse_fen(fen: &str) -> Result<FenPosition, ChessError> {
    let mut fields = fen.split_whitespace();
    let placement = fields
        .next()
        .ok_or_else(|| ChessError::fen(fen, "missing piece placement"))?;
    let active = fields
        .next()
        .ok_or_else(|| ChessError::fen(fen, "missing side to move"))?;
    let castling = fields.next().unwrap_or("-");
    let en_passant = fields.next().unwrap_or("-");
    let half_move_clock = match fields.next() {
        Some(clock) => clock
            .parse::<u32>()
            .map_err(|_| ChessError::fen(fen, format!("bad half-move clock '{clock}'")))?,
        None => 0,
    };

    let mut board = parse_placement(fen, placement)?;

    let side_to_move = match active {
        "w" => Player::White,
        "b" => Player::Black,
        other => return Err(ChessError::fen(fen, format!("bad side to move '{other}'"))),
    };

    apply_castling_rights(fen, castling, &mut board)?;

    if en_passant != "-" {
        let skip = Position::from_algebraic(en_passant)
            .ok_or_else(|| ChessError::InvalidSquare(en_passant.to_string()))?;
        // The pawn that skipped belongs to the side that just moved.
        let mover = side_to_move.opponent();
        let expected_row = mover.pawn_row() + mover.forward().row_delta;
        if skip.row != expected_row {
            return Err(ChessError::fen(fen, format!("en passant square {skip} not on the skip rank")));
        }
        board.set_pawn_skip_position(mover, Some(skip));
    }

    Ok(FenPosition {
        board,
        side_to_move,
        half_move_clock,
    })
}

fn parse_placement(fen: &str, placement: &str) -> Result<Board, ChessError> {
    let mut board = Board::empty();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen(fen, format!("expected 8 ranks, found {}", ranks.len())));
    }

    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(ChessError::fen(fen, format!("bad empty-square count '{c}'")));
                }
                col += skip as usize;
            } else {
                let kind = PieceKind::from_letter(c)
                    .ok_or_else(|| ChessError::fen(fen, format!("unknown piece '{c}'")))?;
                if col >= 8 {
                    return Err(ChessError::fen(fen, format!("rank {} overflows", 8 - row)));
                }
                let color = if c.is_ascii_uppercase() {
                    Player::White
                } else {
                    Player::Black
                };
                let pawn_moved = kind == PieceKind::Pawn && row as i32 != color.pawn_row();
                // Kings and rooks are unmoved only if a castling right says so.
                let moved = pawn_moved || matches!(kind, PieceKind::King | PieceKind::Rook);
                board[(row, col)] = Some(Piece::new(kind, color).with_moved(moved));
                col += 1;
            }
        }
        if col != 8 {
            return Err(ChessError::fen(fen, format!("rank {} has {col} files", 8 - row)));
        }
    }
    Ok(board)
}

fn apply_castling_rights(fen: &str, castling: &str, board: &mut Board) -> Result<(), ChessError> {
    if castling == "-" {
        return Ok(());
    }
    for c in castling.chars() {
        let (player, rook_column) = match c {
            'K' => (Player::White, 7),
            'Q' => (Player::White, 0),
            'k' => (Player::Black, 7),
            'q' => (Player::Black, 0),
            other => return Err(ChessError::fen(fen, format!("bad castling flag '{other}'"))),
        };
        let row = player.home_row();
        let king_pos = Position::new(row, 4);
        let rook_pos = Position::new(row, rook_column);
        for (pos, kind) in [(king_pos, PieceKind::King), (rook_pos, PieceKind::Rook)] {
            match board[pos] {
                Some(p) if p.kind() == kind && p.color() == player => {
                    board[pos] = Some(p.with_moved(false));
                }
                _ => {
                    return Err(ChessError::fen(
                        fen,
                        format!("castling flag '{c}' without {kind:?} on {pos}"),
                    ))
                }
            }
        }
    }
    Ok(())
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, ChessError> {
        Ok(parse_fen(fen)?.board)
    }
}

impl GameState {
    /// Start a game from a FEN record. The half-move clock seeds the
    /// fifty-move counter; repetition history starts fresh.
    pub fn from_fen(fen: &str) -> Result<GameState, ChessError> {
        Self::from_fen_with_config(fen, RulesConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: RulesConfig) -> Result<GameState, ChessError> {
        let parsed = parse_fen(fen)?;
        let mut state = GameState::with_config(parsed.board, parsed.side_to_move, config);
        state.set_no_progress_half_moves(parsed.half_move_clock);
        Ok(state)
    }
}
