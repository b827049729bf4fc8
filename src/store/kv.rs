//! Key-value storage boundary and cross-context change notification.
//!
//! A store handle is one execution context (think: one open view of the
//! same storage). Handles opened from the same store share data; a write
//! through one handle notifies the listeners of every *other* handle, never
//! the writer's own.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument, trace};

use super::error::{StoreError, StoreErrorKind};

/// Callback fired, with no payload, when another context changes the store.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`KeyValueStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Identifies one execution context of a shared store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

/// A string key-value store with change notification.
///
/// Values are opaque text at this boundary.
pub trait KeyValueStore {
    /// Reads the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value under `key`. Readers never observe a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is unusable or the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Registers a listener for changes made by other contexts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the listener registry is unavailable.
    fn subscribe(&self, listener: ChangeListener) -> Result<SubscriptionId, StoreError>;

    /// Removes a listener. Returns `false` if it was not registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the listener registry is unavailable.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError>;
}

struct Registration {
    context: ContextId,
    id: SubscriptionId,
    listener: ChangeListener,
}

/// Fan-out of change notifications between the contexts of one store.
#[derive(Default)]
pub struct ChangeHub {
    next_id: AtomicU64,
    listeners: Mutex<Vec<Registration>>,
}

impl std::fmt::Debug for ChangeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.listeners.lock().map(|l| l.len()).unwrap_or(0);
        f.debug_struct("ChangeHub")
            .field("listeners", &count)
            .finish()
    }
}

impl ChangeHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new context id.
    pub fn new_context(&self) -> ContextId {
        ContextId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers `listener` on behalf of `context`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the registry lock is poisoned.
    #[instrument(skip(self, listener))]
    pub fn subscribe(
        &self,
        context: ContextId,
        listener: ChangeListener,
    ) -> Result<SubscriptionId, StoreError> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .map_err(|_| StoreError::new(StoreErrorKind::LockPoisoned("subscribe")))?
            .push(Registration {
                context,
                id,
                listener,
            });
        debug!(?id, "Listener subscribed");
        Ok(id)
    }

    /// Removes a registration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the registry lock is poisoned.
    #[instrument(skip(self))]
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        let mut listeners = self
            .listeners
            .lock()
            .map_err(|_| StoreError::new(StoreErrorKind::LockPoisoned("unsubscribe")))?;
        let before = listeners.len();
        listeners.retain(|r| r.id != id);
        Ok(listeners.len() != before)
    }

    /// Fires every listener not owned by `writer`. Returns how many fired.
    ///
    /// Listeners run after the registry lock is released, so they may read
    /// the store or subscribe again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the registry lock is poisoned.
    #[instrument(skip(self))]
    pub fn notify_others(&self, writer: ContextId) -> Result<usize, StoreError> {
        let targets: Vec<ChangeListener> = self
            .listeners
            .lock()
            .map_err(|_| StoreError::new(StoreErrorKind::LockPoisoned("notify")))?
            .iter()
            .filter(|r| r.context != writer)
            .map(|r| Arc::clone(&r.listener))
            .collect();

        for listener in &targets {
            listener();
        }

        trace!(notified = targets.len(), "Change notification sent");
        Ok(targets.len())
    }
}

/// Rejects keys that are empty or could escape a storage namespace.
///
/// # Errors
///
/// Returns [`StoreErrorKind::InvalidArgument`] for an unusable key.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::invalid_argument("storage key must not be empty"));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if !key.chars().all(allowed) || key.starts_with('.') {
        return Err(StoreError::invalid_argument(format!(
            "storage key '{}' may only contain ASCII letters, digits, '-', '_' and '.'",
            key
        )));
    }

    Ok(())
}
