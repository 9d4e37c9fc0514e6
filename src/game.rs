// =============================================================================
// Game state machine
//
// A GameState owns the live board and everything that spans turns: the side
// to move, the no-progress half-move counter used by the fifty-move rule, and
// a count of every fingerprint seen since the last capture or pawn move.
// Moves come in through make_move only; after each one the state checks, in
// order, for checkmate/stalemate, insufficient material, the fifty-move rule
// and threefold repetition. Once a result is set the game is terminal.
// =============================================================================

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::config::RulesConfig;
use crate::error::ChessError;
use crate::fingerprint::fingerprint;
use crate::moves::Move;
use crate::piece::{PieceKind, Player};
use crate::position::Position;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

/// How a finished game ended. A win is always by checkmate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum GameResult {
    Win(Player),
    Draw(DrawReason),
}

impl GameResult {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win(player) => Some(*player),
            GameResult::Draw(_) => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(player) => write!(f, "{player} wins"),
            GameResult::Draw(DrawReason::Stalemate) => write!(f, "Draw by stalemate"),
            GameResult::Draw(DrawReason::FiftyMoveRule) => write!(f, "Draw by fifty-move rule"),
            GameResult::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "Draw by insufficient material")
            }
            GameResult::Draw(DrawReason::ThreefoldRepetition) => write!(f, "Draw by repetition"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current_player: Player,
    result: Option<GameResult>,
    no_capture_or_pawn_moves: u32,
    state_string: String,
    state_history: HashMap<String, u32>,
    config: RulesConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::initial(), Player::White)
    }
}

impl GameState {
    pub fn new(board: Board, player: Player) -> Self {
        Self::with_config(board, player, RulesConfig::default())
    }

    pub fn with_config(board: Board, player: Player, config: RulesConfig) -> Self {
        let state_string = fingerprint(&board, player);
        let mut state_history = HashMap::new();
        state_history.insert(state_string.clone(), 1);
        GameState {
            board,
            current_player: player,
            result: None,
            no_capture_or_pawn_moves: 0,
            state_string,
            state_history,
            config,
        }
    }

    /// Seed the fifty-move counter, for positions loaded mid-game.
    pub(crate) fn set_no_progress_half_moves(&mut self, half_moves: u32) {
        self.no_capture_or_pawn_moves = half_moves;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Fingerprint of the current position.
    pub fn fingerprint(&self) -> &str {
        &self.state_string
    }

    pub fn no_progress_half_moves(&self) -> u32 {
        self.no_capture_or_pawn_moves
    }

    /// Legal moves of the piece on `pos`. Empty when the square is empty,
    /// off the board, or holds a piece of the side not to move.
    pub fn legal_moves_for_piece(&self, pos: Position) -> Vec<Move> {
        match self.board.piece_at(pos) {
            Some(piece) if piece.color() == self.current_player => piece
                .get_moves(pos, &self.board)
                .into_iter()
                .filter(|mv| mv.is_legal(&self.board))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn all_legal_moves_for(&self, player: Player) -> Vec<Move> {
        self.board.legal_moves_for(player)
    }

    /// Look up the legal move matching the given squares. `promotion` picks
    /// the piece for a promoting move and is ignored otherwise.
    pub fn find_legal_move(
        &self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> Result<Move, ChessError> {
        if let Some(result) = self.result {
            return Err(ChessError::GameOver(result));
        }
        let mv = self
            .legal_moves_for_piece(from)
            .into_iter()
            .find(|mv| mv.to() == to)
            .ok_or(ChessError::IllegalMove { from, to })?;
        Ok(match promotion {
            Some(piece) => mv.promoting_to(piece),
            None => mv,
        })
    }

    /// Apply a move obtained from `legal_moves_for_piece` or
    /// `all_legal_moves_for` in the current position. The move is not
    /// re-validated.
    pub fn make_move(&mut self, mv: &Move) {
        debug_assert!(self.result.is_none(), "move applied to a finished game");

        self.board.set_pawn_skip_position(self.current_player, None);
        let capture_or_pawn = mv.execute(&mut self.board);

        if capture_or_pawn {
            self.no_capture_or_pawn_moves = 0;
            self.state_history.clear();
        } else {
            self.no_capture_or_pawn_moves += 1;
        }

        self.current_player = self.current_player.opponent();
        self.update_state_string();
        self.check_for_game_over();
    }

    fn update_state_string(&mut self) {
        self.state_string = fingerprint(&self.board, self.current_player);
        *self
            .state_history
            .entry(self.state_string.clone())
            .or_insert(0) += 1;
    }

    fn check_for_game_over(&mut self) {
        if self.all_legal_moves_for(self.current_player).is_empty() {
            self.result = Some(if self.board.is_in_check(self.current_player) {
                GameResult::Win(self.current_player.opponent())
            } else {
                GameResult::Draw(DrawReason::Stalemate)
            });
        } else if self.board.insufficient_material() {
            self.result = Some(GameResult::Draw(DrawReason::InsufficientMaterial));
        } else if self.fifty_move_rule() {
            self.result = Some(GameResult::Draw(DrawReason::FiftyMoveRule));
        } else if self.threefold_repetition() {
            self.result = Some(GameResult::Draw(DrawReason::ThreefoldRepetition));
        }
    }

    fn fifty_move_rule(&self) -> bool {
        self.no_capture_or_pawn_moves >= self.config.fifty_move_half_moves
    }

    fn threefold_repetition(&self) -> bool {
        self.state_history
            .get(&self.state_string)
            .map_or(false, |&count| count >= self.config.repetition_count)
    }
}
