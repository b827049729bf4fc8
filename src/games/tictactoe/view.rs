//! Derived view of the active game.
//!
//! Nothing here is stored: the current player and completion status are
//! recomputed from the move log every time.

use derive_getters::Getters;
use tracing::{debug, instrument};

use super::document::{GameDocument, GameStatus};
use super::position::{Position, SquareSet};
use super::rules::{self, Occupancy, WinPattern};
use super::types::{Move, Player, Roster};

/// Current player, moves and status of the active game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameView {
    /// Moves of the active game in turn order.
    moves: Vec<Move>,
    /// The player whose turn it is.
    current_player: Player,
    /// Completion status.
    status: GameStatus,
    /// The line that won the game, if any.
    winning_pattern: Option<WinPattern>,
}

impl GameView {
    /// Derives the view of the active game in `doc`.
    ///
    /// The current player is `roster[moves % roster.len()]`; a game is
    /// complete once someone holds a winning line or all nine squares are
    /// claimed. Pure: the document is only read.
    #[instrument(skip(doc, roster), fields(moves = doc.current_game_moves().len()))]
    pub fn derive(doc: &GameDocument, roster: &Roster) -> Self {
        let moves = doc.current_game_moves();
        let current_player = roster.for_turn(moves.len()).clone();

        let occupancy: Vec<Occupancy<'_>> = roster
            .players()
            .iter()
            .map(|player| {
                let squares: SquareSet = moves
                    .iter()
                    .filter(|mv| mv.player().is(player))
                    .map(|mv| *mv.square_id())
                    .collect();
                Occupancy::new(player, squares)
            })
            .collect();

        let win = rules::winning_pattern(&occupancy);
        let winner = win.map(|(player, _)| player.clone());
        let is_complete = winner.is_some() || rules::is_full(moves);

        debug!(
            current_player = %current_player.name(),
            is_complete,
            winner = ?winner.as_ref().map(|p| p.name()),
            "Derived game view"
        );

        Self {
            moves: moves.clone(),
            current_player,
            status: GameStatus::new(is_complete, winner),
            winning_pattern: win.map(|(_, pattern)| pattern),
        }
    }

    /// Returns the player who claimed `pos`, if any.
    pub fn occupant(&self, pos: Position) -> Option<&Player> {
        self.moves
            .iter()
            .find(|mv| *mv.square_id() == pos)
            .map(|mv| mv.player())
    }

    /// Returns true if `pos` has been claimed in this game.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupant(pos).is_some()
    }

    /// Occupants of all nine squares in square id order.
    pub fn board(&self) -> [Option<&Player>; 9] {
        Position::ALL.map(|pos| self.occupant(pos))
    }

    /// Unclaimed squares in square id order.
    pub fn open_squares(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| !self.is_occupied(*pos))
            .collect()
    }
}
