//! Repository for the single persisted game document.

use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::GameDocument;
use crate::store::{
    ChangeListener, KeyValueStore, StoreError, StoreErrorKind, SubscriptionId, validate_key,
};

/// Reads and writes the game document under one key of a key-value store.
///
/// The repository holds no cached copy: every call goes back to the store.
#[derive(Debug, Clone)]
pub struct StateRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StateRepository<S> {
    /// Creates a repository for `key` in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::InvalidArgument`] if the key is unusable.
    #[instrument(skip(store, key), fields(key = %key.as_ref()))]
    pub fn new(store: S, key: impl AsRef<str>) -> Result<Self, StoreError> {
        let key = key.as_ref().to_string();
        validate_key(&key)?;
        info!(key = %key, "Creating StateRepository");
        Ok(Self { store, key })
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored document.
    ///
    /// Returns the default empty document when nothing is stored or the
    /// stored text is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the store itself cannot be read.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<GameDocument, StoreError> {
        let Some(text) = self.store.get(&self.key)? else {
            debug!("No stored document, using default");
            return Ok(GameDocument::default());
        };

        match parse_document(&text) {
            Ok(doc) => {
                debug!(
                    moves = doc.current_game_moves().len(),
                    round_games = doc.history().current_round_games().len(),
                    "Document loaded"
                );
                Ok(doc)
            }
            Err(e) => {
                warn!(error = %e, "Stored document unusable, using default");
                Ok(GameDocument::default())
            }
        }
    }

    /// Replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails; the
    /// stored document is then unchanged.
    #[instrument(skip(self, doc), fields(key = %self.key, moves = doc.current_game_moves().len()))]
    pub fn save(&self, doc: &GameDocument) -> Result<(), StoreError> {
        let text = serde_json::to_string(doc)?;
        self.store.set(&self.key, &text)?;
        debug!(bytes = text.len(), "Document saved");
        Ok(())
    }

    /// Applies `transform` to the document as stored right now and saves
    /// the result, which is also returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read or the write fails.
    #[instrument(skip(self, transform), fields(key = %self.key))]
    pub fn update<F>(&self, transform: F) -> Result<GameDocument, StoreError>
    where
        F: FnOnce(&GameDocument) -> GameDocument,
    {
        let current = self.load()?;
        let next = transform(&current);
        self.save(&next)?;
        Ok(next)
    }

    /// Registers a listener fired when another context changes the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot register it.
    pub fn subscribe(&self, listener: ChangeListener) -> Result<SubscriptionId, StoreError> {
        self.store.subscribe(listener)
    }

    /// Removes a listener registered with [`StateRepository::subscribe`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot remove it.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        self.store.unsubscribe(id)
    }
}

/// Parses stored text into a structurally valid document.
///
/// # Errors
///
/// Returns [`StoreErrorKind::MalformedDocument`] if the text is not a
/// document or breaks a document invariant.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_document(text: &str) -> Result<GameDocument, StoreError> {
    let doc: GameDocument = serde_json::from_str(text)
        .map_err(|e| StoreError::new(StoreErrorKind::MalformedDocument(e.to_string())))?;
    doc.validate()
        .map_err(|reason| StoreError::new(StoreErrorKind::MalformedDocument(reason)))?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Move, Player, Position};
    use crate::store::MemoryStore;

    const KEY: &str = "live-t3-storage-key";

    fn p1() -> Player {
        Player::new(1, "Player 1", "fa-x", "turquoise")
    }

    #[test]
    fn test_load_missing_returns_default() {
        let repo = StateRepository::new(MemoryStore::new(), KEY).unwrap();
        assert_eq!(repo.load().unwrap(), GameDocument::default());
    }

    #[test]
    fn test_save_then_load() {
        let repo = StateRepository::new(MemoryStore::new(), KEY).unwrap();
        let doc = GameDocument::default().with_move(Move::new(Position::Center, p1()));
        repo.save(&doc).unwrap();
        assert_eq!(repo.load().unwrap(), doc);
    }

    #[test]
    fn test_malformed_text_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(KEY, "{not json").unwrap();
        let repo = StateRepository::new(store, KEY).unwrap();
        assert_eq!(repo.load().unwrap(), GameDocument::default());
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(KEY, r#"{"currentGameMoves": 3}"#).unwrap();
        let repo = StateRepository::new(store, KEY).unwrap();
        assert_eq!(repo.load().unwrap(), GameDocument::default());
    }

    #[test]
    fn test_update_sees_current_value() {
        let store = MemoryStore::new();
        let repo = StateRepository::new(store.clone(), KEY).unwrap();
        let other = StateRepository::new(store.open_context(), KEY).unwrap();

        other
            .save(&GameDocument::default().with_move(Move::new(Position::TopLeft, p1())))
            .unwrap();

        let next = repo
            .update(|doc| doc.with_move(Move::new(Position::Center, p1())))
            .unwrap();
        assert_eq!(next.current_game_moves().len(), 2);
        assert_eq!(repo.load().unwrap(), next);
    }

    #[test]
    fn test_rejects_empty_key() {
        let err = StateRepository::new(MemoryStore::new(), "").unwrap_err();
        assert!(matches!(err.kind(), StoreErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn test_repeated_square_falls_back_to_default() {
        let store = MemoryStore::new();
        let player = r#"{"id": 1, "name": "P", "iconClass": "i", "colorClass": "c"}"#;
        let text = format!(
            r#"{{
                "currentGameMoves": [
                    {{"squareId": 5, "player": {player}}},
                    {{"squareId": 5, "player": {player}}}
                ],
                "history": {{"currentRoundGames": [], "allGames": []}}
            }}"#
        );
        store.set(KEY, &text).unwrap();

        let repo = StateRepository::new(store, KEY).unwrap();
        assert_eq!(repo.load().unwrap(), GameDocument::default());
    }

    #[test]
    fn test_oversized_history_game_falls_back_to_default() {
        let moves: Vec<Move> = Position::ALL
            .into_iter()
            .chain([Position::Center])
            .map(|pos| Move::new(pos, p1()))
            .collect();
        let game = serde_json::json!({
            "moves": moves,
            "status": {"isComplete": true, "winner": null},
        });
        let text = serde_json::json!({
            "currentGameMoves": [],
            "history": {"currentRoundGames": [game], "allGames": []},
        })
        .to_string();

        let store = MemoryStore::new();
        store.set(KEY, &text).unwrap();
        let repo = StateRepository::new(store, KEY).unwrap();
        assert_eq!(repo.load().unwrap(), GameDocument::default());
    }

    #[test]
    fn test_parse_document_rejects_out_of_range_square() {
        let text = r#"{
            "currentGameMoves": [{
                "squareId": 10,
                "player": {"id": 1, "name": "P", "iconClass": "i", "colorClass": "c"}
            }],
            "history": {"currentRoundGames": [], "allGames": []}
        }"#;
        let err = parse_document(text).unwrap_err();
        assert!(matches!(err.kind(), StoreErrorKind::MalformedDocument(_)));
    }
}
