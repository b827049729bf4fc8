//! Live T3 library - a persistent tic-tac-toe game-state engine
//!
//! The engine turns an append-only log of moves into the current board,
//! turn and win/tie status, and keeps round and session history across
//! resets. State lives in a single JSON document behind a key-value store.
//!
//! # Architecture
//!
//! - **Store**: [`StateRepository`] over any [`KeyValueStore`] ([`MemoryStore`], [`FileStore`])
//! - **Rules**: win patterns and board-full detection ([`check_winner`])
//! - **View**: [`GameView`] derived from the stored document
//! - **History**: [`HistoryTracker`] for reset, new round and stats
//! - **Controller**: [`GameController`] composing the above for a UI
//!
//! # Example
//!
//! ```
//! use live_t3::{GameController, MemoryStore, MoveOutcome, Position, Roster, StateRepository};
//!
//! # fn example() -> Result<(), live_t3::StoreError> {
//! let repo = StateRepository::new(MemoryStore::new(), "live-t3-storage-key")?;
//! let game = GameController::new(repo, Roster::default());
//!
//! if let MoveOutcome::Played(view) = game.player_move(Position::Center)? {
//!     assert_eq!(view.current_player().name(), "Player 2");
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_STORAGE_KEY, GameConfig, PlayerConfig};

// Crate-level exports - Controller
pub use controller::{GameController, MoveOutcome};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    CompletedGame, GameDocument, GameStatus, GameView, History, HistoryTracker, InvalidSquare,
    Move, Occupancy, Player, PlayerStats, Position, Roster, RoundStats, SquareSet, WinPattern,
    check_winner, winning_pattern,
};

// Crate-level exports - Persistence
pub use store::{
    ChangeHub, ChangeListener, ContextId, FileStore, KeyValueStore, MemoryStore, StateRepository,
    StoreError, StoreErrorKind, SubscriptionId, parse_document, validate_key,
};
