use crate::game::GameResult;
use crate::position::Position;

/// Errors from the fallible entry points around the rules core: parsing
/// positions and configs, and looking up moves by coordinates.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("invalid FEN string: {fen}: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("game is already over: {0}")]
    GameOver(GameResult),

    #[error("invalid rules config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ChessError {
    pub(crate) fn fen(fen: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }
}
