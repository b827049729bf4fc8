//! The persisted game document.
//!
//! The document is the single JSON root stored under one key. It is only
//! ever replaced as a whole: every transition clones the previous value and
//! returns a new one, so a caller holding a reference never sees it change.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::position::SquareSet;
use super::rules::BOARD_SIZE;
use super::types::{Move, Player};

/// Completion status of a game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    /// True once a player has won or the board is full.
    is_complete: bool,
    /// The winning player, `None` while in progress or on a tie.
    winner: Option<Player>,
}

impl GameStatus {
    /// Creates a status.
    pub fn new(is_complete: bool, winner: Option<Player>) -> Self {
        Self {
            is_complete,
            winner,
        }
    }

    /// Returns true once a player has won or the board is full.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Returns the winning player.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref()
    }

    /// Returns true if the game finished without a winner.
    pub fn is_tie(&self) -> bool {
        self.is_complete && self.winner.is_none()
    }
}

/// A finished game as recorded in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct CompletedGame {
    /// The finished move sequence.
    moves: Vec<Move>,
    /// Final status (always complete).
    status: GameStatus,
}

/// Completed games of the current round and of the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct History {
    /// Games completed since the last new round, oldest first.
    pub(super) current_round_games: Vec<CompletedGame>,
    /// Games from every finished round, oldest first.
    pub(super) all_games: Vec<CompletedGame>,
}

/// The persisted root document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    /// Moves of the active game in turn order.
    pub(super) current_game_moves: Vec<Move>,
    /// Round and session history.
    pub(super) history: History,
}

impl GameDocument {
    /// Creates a document.
    pub fn new(current_game_moves: Vec<Move>, history: History) -> Self {
        Self {
            current_game_moves,
            history,
        }
    }

    /// Returns true if a move in the active game already claims `square_id`.
    pub fn is_occupied(&self, square_id: super::Position) -> bool {
        self.current_game_moves
            .iter()
            .any(|mv| *mv.square_id() == square_id)
    }

    /// Returns a copy of this document with `mv` appended to the active game.
    pub fn with_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.current_game_moves.push(mv);
        next
    }

    /// Checks the structural invariants a parsed document must satisfy.
    ///
    /// The active game holds at most nine moves and no square twice.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        check_moves(&self.current_game_moves)
            .map_err(|reason| format!("currentGameMoves: {}", reason))?;

        let recorded = self
            .history
            .current_round_games
            .iter()
            .chain(self.history.all_games.iter());
        for (index, game) in recorded.enumerate() {
            check_moves(game.moves())
                .map_err(|reason| format!("history game {}: {}", index, reason))?;
        }

        Ok(())
    }
}

fn check_moves(moves: &[Move]) -> Result<(), String> {
    if moves.len() > BOARD_SIZE {
        return Err(format!("{} moves exceeds board size", moves.len()));
    }

    let mut seen = SquareSet::EMPTY;
    for mv in moves {
        if !seen.insert(*mv.square_id()) {
            return Err(format!("square {} played twice", mv.square_id()));
        }
    }

    Ok(())
}
