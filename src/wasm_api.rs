use crate::game::GameState;
use crate::piece::PieceKind;
use crate::position::Position;
use crate::view::{GameView, MoveView};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    state: Option<GameView>,
    error: Option<String>,
}

fn string_to_piece_kind(s: &str) -> Option<PieceKind> {
    match s {
        "Queen" => Some(PieceKind::Queen),
        "Rook" => Some(PieceKind::Rook),
        "Bishop" => Some(PieceKind::Bishop),
        "Knight" => Some(PieceKind::Knight),
        _ => None,
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Browser-facing handle on one game. The shell renders from `get_state`
/// and submits moves by coordinates.
#[wasm_bindgen]
pub struct Game {
    state: GameState,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            state: GameState::default(),
        }
    }

    pub fn restart(&mut self) {
        self.state = GameState::default();
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&GameView::from(&self.state))
    }

    pub fn legal_moves_for_square(&self, row: i32, col: i32) -> JsValue {
        let moves: Vec<MoveView> = self
            .state
            .legal_moves_for_piece(Position::new(row, col))
            .iter()
            .map(MoveView::from)
            .collect();
        to_js(&moves)
    }

    pub fn make_move(
        &mut self,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
        promotion: Option<String>,
    ) -> JsValue {
        let promo = promotion.as_deref().and_then(string_to_piece_kind);
        let found = self.state.find_legal_move(
            Position::new(from_row, from_col),
            Position::new(to_row, to_col),
            promo,
        );
        match found {
            Ok(mv) => {
                self.state.make_move(&mv);
                to_js(&GameView::from(&self.state))
            }
            Err(e) => to_js(&MoveResult {
                state: None,
                error: Some(e.to_string()),
            }),
        }
    }
}
