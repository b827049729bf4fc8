//! Board-full detection for tic-tac-toe.

use super::super::{Move, Position};
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = Position::ALL.len();

/// Checks if every square has been claimed.
///
/// Square ids within one game are unique, so a full board is exactly
/// [`BOARD_SIZE`] moves. A full board with no winner is a tie.
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn is_full(moves: &[Move]) -> bool {
    moves.len() >= BOARD_SIZE
}
