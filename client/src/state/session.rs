//! Session store for the current portal identity.
//!
//! DESIGN
//! ======
//! One `SessionStore` is built at startup and handed to every consumer
//! (API client, guards, views); there is no global. Clones share the same
//! state. `login` and `logout` are the only writers; readers either take a
//! snapshot or `subscribe` to a `watch` channel to react to changes.
//!
//! Persistence goes through `SessionStorage`: the in-memory backend mirrors
//! per-tab storage that dies with the process, the file backend lets the
//! CLI keep a login across invocations.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use fesup_model::{AdminIdentity, Identity, StudentIdentity};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

// =============================================================================
// STORAGE BACKENDS
// =============================================================================

/// Raw persistence of the serialized identity record.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, ClientError>;
    fn save(&self, record: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Ephemeral storage: gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_record(record: &str) -> Self {
        Self { slot: Mutex::new(Some(record.to_owned())) }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, record: &str) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }

    fn save(&self, record: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        std::fs::write(&self.path, record).map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: Arc<watch::Sender<Option<Identity>>>,
}

impl SessionStore {
    /// Build a store over `storage`, restoring any saved identity. A record
    /// that no longer parses is discarded.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let restored = restore(storage.as_ref());
        let (tx, _rx) = watch::channel(restored);
        Self { storage, current: Arc::new(tx) }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// File-backed when `FESUP_SESSION_FILE` is configured, else in memory.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.session_file {
            Some(path) => Self::new(Arc::new(FileStorage::new(path.clone()))),
            None => Self::in_memory(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn student(&self) -> Option<StudentIdentity> {
        self.current.borrow().as_ref().and_then(Identity::as_student).cloned()
    }

    #[must_use]
    pub fn admin(&self) -> Option<AdminIdentity> {
        self.current.borrow().as_ref().and_then(Identity::as_admin).cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Receiver that observes every login/logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }

    /// Replace the current identity and persist it.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the record cannot be written; the in-memory
    /// identity is left unchanged in that case.
    pub fn login(&self, identity: Identity) -> Result<(), ClientError> {
        let record = serde_json::to_string(&identity).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.save(&record)?;
        debug!(who = %identity.display_name(), "session opened");
        self.current.send_replace(Some(identity));
        Ok(())
    }

    /// Forget the current identity. The in-memory state is always cleared.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the persisted record could not be removed.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.current.send_replace(None);
        debug!("session closed");
        self.storage.clear()
    }
}

fn restore(storage: &dyn SessionStorage) -> Option<Identity> {
    let record = match storage.load() {
        Ok(record) => record?,
        Err(e) => {
            warn!(error = %e, "session restore failed; starting logged out");
            return None;
        }
    };
    match serde_json::from_str::<Identity>(&record) {
        Ok(identity) => Some(identity),
        Err(e) => {
            warn!(error = %e, "discarding corrupt session record");
            if let Err(e) = storage.clear() {
                warn!(error = %e, "failed to clear corrupt session record");
            }
            None
        }
    }
}
