//! File-backed key-value store.
//!
//! Each key is one `<key>.json` file in a directory. Writes go to a temp
//! file in the same directory and are renamed into place.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use super::error::{StoreError, StoreErrorKind};
use super::kv::{ChangeHub, ChangeListener, ContextId, KeyValueStore, SubscriptionId, validate_key};

/// A key-value store persisted as files in one directory.
///
/// Change notifications reach contexts opened from the same handle via
/// [`FileStore::open_context`]; writes from other processes are not observed.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    context: ContextId,
    hub: Arc<ChangeHub>,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        let hub = Arc::new(ChangeHub::new());
        let context = hub.new_context();
        info!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir, context, hub })
    }

    /// Opens another context over the same directory.
    pub fn open_context(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            context: self.hub.new_context(),
            hub: Arc::clone(&self.hub),
        }
    }

    /// The directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::InvalidArgument`] for an unusable key.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Ok(Some(text)),
                Err(e) => {
                    // Undecodable bytes are handed on so the document parser rejects them.
                    warn!(path = %path.display(), error = %e, "Stored value is not UTF-8");
                    Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .map_err(|e| StoreError::new(StoreErrorKind::Io(e.error.to_string())))?;

        debug!(path = %path.display(), "Value written");
        self.hub.notify_others(self.context)?;
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> Result<SubscriptionId, StoreError> {
        self.hub.subscribe(self.context, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        self.hub.unsubscribe(id)
    }
}
