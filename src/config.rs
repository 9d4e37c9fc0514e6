use serde::{Deserialize, Serialize};

use crate::error::ChessError;

/// Draw thresholds. The defaults are the standard rules; shells may load
/// variations from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Half-moves without a capture or pawn move before the game is drawn.
    pub fifty_move_half_moves: u32,
    /// Occurrences of the same fingerprint that draw the game.
    pub repetition_count: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            fifty_move_half_moves: 100,
            repetition_count: 3,
        }
    }
}

impl RulesConfig {
    pub fn from_json(json: &str) -> Result<Self, ChessError> {
        Ok(serde_json::from_str(json)?)
    }
}
