//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a game according to
//! tic-tac-toe rules. Rules are separated from storage so the view layer
//! can compose them over any move list.

pub mod draw;
pub mod win;

pub use draw::{BOARD_SIZE, is_full};
pub use win::{Occupancy, WinPattern, check_winner, winning_pattern};
