//! In-memory store backends.

use crate::{CredentialStore, HistoryStore};
use async_trait::async_trait;
use scenecraft_core::{ApiKey, Session};
use scenecraft_error::{StorageError, StorageErrorKind, StorageResult};
use std::sync::{Arc, Mutex, PoisonError};

fn poisoned<T>(_: PoisonError<T>) -> StorageError {
    StorageError::new(StorageErrorKind::Corrupt("store lock poisoned".to_string()))
}

/// Process-local credential store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    key: Arc<Mutex<Option<ApiKey>>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `raw` (ignored if blank).
    pub fn with_key(raw: &str) -> Self {
        Self {
            key: Arc::new(Mutex::new(ApiKey::parse(raw))),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self) -> StorageResult<Option<ApiKey>> {
        Ok(self.key.lock().map_err(poisoned)?.clone())
    }

    async fn set(&self, raw: &str) -> StorageResult<()> {
        let key = ApiKey::parse(raw).ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidCredential(
                "API key must not be blank".to_string(),
            ))
        })?;
        *self.key.lock().map_err(poisoned)? = Some(key);
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        *self.key.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

/// Process-local session history.
///
/// Clones share the same list, so a test can keep a handle and inspect what
/// the pipeline saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    sessions: Arc<Mutex<Vec<Session>>>,
    saves: Arc<Mutex<usize>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `sessions`.
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
            saves: Arc::default(),
        }
    }

    /// Number of `save_all` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or_default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load_all(&self) -> StorageResult<Vec<Session>> {
        Ok(self.sessions.lock().map_err(poisoned)?.clone())
    }

    async fn save_all(&self, sessions: &[Session]) -> StorageResult<()> {
        *self.sessions.lock().map_err(poisoned)? = sessions.to_vec();
        *self.saves.lock().map_err(poisoned)? += 1;
        Ok(())
    }
}
