//! Serializable snapshot of a game, shaped for a presentation shell.

use serde::Serialize;

use crate::game::GameState;
use crate::moves::{Move, MoveKind};
use crate::piece::{PieceKind, Player};
use crate::position::Position;

#[derive(Serialize, Debug, PartialEq)]
pub struct SquarePiece {
    pub piece_type: PieceKind,
    pub color: Player,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct MoveView {
    pub from: [i32; 2],
    pub to: [i32; 2],
    pub kind: MoveKind,
    pub promotion: Option<PieceKind>,
}

impl From<&Move> for MoveView {
    fn from(m: &Move) -> Self {
        MoveView {
            from: [m.from().row, m.from().column],
            to: [m.to().row, m.to().column],
            kind: m.kind(),
            promotion: m.promotion(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct GameView {
    pub squares: Vec<Vec<Option<SquarePiece>>>,
    pub current_player: Player,
    pub game_over: bool,
    pub result: Option<String>,
    pub winner: Option<Player>,
    pub is_in_check: bool,
    pub legal_moves: Vec<MoveView>,
    pub fingerprint: String,
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        let board = state.board();
        let squares = (0..8)
            .map(|r| {
                (0..8)
                    .map(|c| {
                        board.piece_at(Position::new(r, c)).map(|p| SquarePiece {
                            piece_type: p.kind(),
                            color: p.color(),
                        })
                    })
                    .collect()
            })
            .collect();

        let legal_moves = if state.is_game_over() {
            Vec::new()
        } else {
            state
                .all_legal_moves_for(state.current_player())
                .iter()
                .map(MoveView::from)
                .collect()
        };

        GameView {
            squares,
            current_player: state.current_player(),
            game_over: state.is_game_over(),
            result: state.result().map(|r| r.to_string()),
            winner: state.result().and_then(|r| r.winner()),
            is_in_check: board.is_in_check(state.current_player()),
            legal_moves,
            fingerprint: state.fingerprint().to_string(),
        }
    }
}
