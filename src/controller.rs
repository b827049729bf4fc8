//! Move, reset and new-round operations over the stored document.

use tracing::{info, instrument};

use crate::games::tictactoe::{
    GameDocument, GameView, HistoryTracker, Move, Position, Roster, RoundStats,
};
use crate::store::{ChangeListener, KeyValueStore, StateRepository, StoreError, SubscriptionId};

/// Result of [`GameController::player_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was recorded; carries the view after the move.
    Played(GameView),
    /// The square was already claimed; nothing was written.
    SquareOccupied(Position),
}

impl MoveOutcome {
    /// Returns true if the move was recorded.
    pub fn is_played(&self) -> bool {
        matches!(self, MoveOutcome::Played(_))
    }
}

/// Game operations consumed by a UI.
///
/// Every operation re-reads the document from the repository, derives the
/// view, and writes back a new whole document, so nothing is cached between
/// calls. Operations are synchronous and either write a complete document or
/// leave the stored one unchanged.
#[derive(Debug, Clone)]
pub struct GameController<S> {
    repository: StateRepository<S>,
    roster: Roster,
}

impl<S: KeyValueStore> GameController<S> {
    /// Creates a controller over `repository` for the configured players.
    #[instrument(skip(repository, roster), fields(key = %repository.key()))]
    pub fn new(repository: StateRepository<S>, roster: Roster) -> Self {
        info!("Creating GameController");
        Self { repository, roster }
    }

    /// The configured players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The underlying repository.
    pub fn repository(&self) -> &StateRepository<S> {
        &self.repository
    }

    /// The current view of the active game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    #[instrument(skip(self))]
    pub fn game(&self) -> Result<GameView, StoreError> {
        let doc = self.repository.load()?;
        Ok(GameView::derive(&doc, &self.roster))
    }

    /// Wins per player and ties for the current round.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    #[instrument(skip(self))]
    pub fn stats(&self) -> Result<RoundStats, StoreError> {
        let doc = self.repository.load()?;
        Ok(HistoryTracker::stats(&doc, &self.roster))
    }

    /// Wins per player and ties over every recorded game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    #[instrument(skip(self))]
    pub fn session_stats(&self) -> Result<RoundStats, StoreError> {
        let doc = self.repository.load()?;
        Ok(HistoryTracker::session_stats(&doc, &self.roster))
    }

    /// Claims `square` for the player whose turn it is.
    ///
    /// The player is the one to move *before* the append. A square already
    /// claimed in the active game is a no-op reported as
    /// [`MoveOutcome::SquareOccupied`]. Whether the game is already over is
    /// the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn player_move(&self, square: Position) -> Result<MoveOutcome, StoreError> {
        let doc = self.repository.load()?;

        if doc.is_occupied(square) {
            info!("Square already occupied, move ignored");
            return Ok(MoveOutcome::SquareOccupied(square));
        }

        let player = GameView::derive(&doc, &self.roster).current_player().clone();
        let next = doc.with_move(Move::new(square, player));
        self.repository.save(&next)?;

        let view = GameView::derive(&next, &self.roster);
        info!(
            player = %next.current_game_moves().last().map_or("", |m| m.player().name().as_str()),
            complete = view.status().is_complete(),
            "Move played"
        );
        Ok(MoveOutcome::Played(view))
    }

    /// Ends the active game, recording it in the current round if complete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn reset_game(&self) -> Result<GameView, StoreError> {
        self.transition(HistoryTracker::reset)
    }

    /// Resets the active game and archives the current round.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn start_new_round(&self) -> Result<GameView, StoreError> {
        self.transition(HistoryTracker::new_round)
    }

    /// Registers a callback for changes made by another context. The
    /// callback should re-read through this controller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot register it.
    pub fn subscribe(&self, listener: ChangeListener) -> Result<SubscriptionId, StoreError> {
        self.repository.subscribe(listener)
    }

    /// Removes a callback registered with [`GameController::subscribe`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot remove it.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        self.repository.unsubscribe(id)
    }

    fn transition(
        &self,
        step: fn(&GameDocument, &GameView) -> GameDocument,
    ) -> Result<GameView, StoreError> {
        let roster = &self.roster;
        let next = self
            .repository
            .update(|doc| step(doc, &GameView::derive(doc, roster)))?;
        Ok(GameView::derive(&next, roster))
    }
}
