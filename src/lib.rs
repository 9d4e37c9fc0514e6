pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod fingerprint;
pub mod game;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use config::RulesConfig;
pub use error::ChessError;
pub use game::{DrawReason, GameResult, GameState};
pub use moves::{Move, MoveKind};
pub use piece::{Piece, PieceKind, Player};
pub use position::{Direction, Position};
