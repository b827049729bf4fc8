//! Persistence layer for the game document.

mod error;
mod file;
mod kv;
mod memory;
mod repository;

pub use error::{StoreError, StoreErrorKind};
pub use file::FileStore;
pub use kv::{ChangeHub, ChangeListener, ContextId, KeyValueStore, SubscriptionId, validate_key};
pub use memory::MemoryStore;
pub use repository::{StateRepository, parse_document};
