//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, instrument};

use super::error::{StoreError, StoreErrorKind};
use super::kv::{ChangeHub, ChangeListener, ContextId, KeyValueStore, SubscriptionId, validate_key};

#[derive(Debug, Default)]
struct Shared {
    entries: RwLock<HashMap<String, String>>,
    hub: ChangeHub,
}

/// A key-value store held in process memory.
///
/// Cloning a handle keeps the same context; use [`MemoryStore::open_context`]
/// for a second observer that should be notified of this handle's writes.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    context: ContextId,
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Creates an empty store with a single context.
    #[instrument]
    pub fn new() -> Self {
        let shared = Arc::new(Shared::default());
        let context = shared.hub.new_context();
        Self { context, shared }
    }

    /// Opens another context over the same data.
    #[instrument(skip(self), fields(context = ?self.context))]
    pub fn open_context(&self) -> Self {
        let context = self.shared.hub.new_context();
        debug!(?context, "Opened memory store context");
        Self {
            context,
            shared: Arc::clone(&self.shared),
        }
    }

    /// This handle's context id.
    pub fn context(&self) -> ContextId {
        self.context
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self), fields(context = ?self.context))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .shared
            .entries
            .read()
            .map_err(|_| StoreError::new(StoreErrorKind::LockPoisoned("read")))?;
        Ok(entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(context = ?self.context, bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        {
            let mut entries = self
                .shared
                .entries
                .write()
                .map_err(|_| StoreError::new(StoreErrorKind::LockPoisoned("write")))?;
            entries.insert(key.to_string(), value.to_string());
        }
        self.shared.hub.notify_others(self.context)?;
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> Result<SubscriptionId, StoreError> {
        self.shared.hub.subscribe(self.context, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        self.shared.hub.unsubscribe(id)
    }
}
