//! Tic-tac-toe game-state engine.
//!
//! The stored [`GameDocument`] is an append-only move log plus history.
//! Everything else is derived from it: [`GameView`] computes the player to
//! move and the completion status, and [`HistoryTracker`] produces the next
//! document when a game is reset or a new round begins.

mod document;
mod history;
mod position;
pub mod rules;
mod types;
mod view;

pub use document::{CompletedGame, GameDocument, GameStatus, History};
pub use history::{HistoryTracker, PlayerStats, RoundStats};
pub use position::{InvalidSquare, Position, SquareSet};
pub use rules::{Occupancy, WinPattern, check_winner, winning_pattern};
pub use types::{Move, Player, Roster};
pub use view::GameView;
