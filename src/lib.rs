#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod error;
pub mod force;
pub mod grid;
pub mod movement;
pub mod piece;
pub mod rules;
pub mod starter;
pub mod util;

pub use board::{Board, GameStatus, MoveStatus, TurnKind, TurnOutcome};
pub use error::TurnError;
pub use force::Force;
