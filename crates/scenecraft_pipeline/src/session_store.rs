//! Ordered session history over a persistence backend.

use scenecraft_core::{Session, SessionId};
use scenecraft_error::{StorageError, StorageErrorKind, StorageResult};
use scenecraft_storage::HistoryStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Most-recent-first list of completed sessions.
///
/// Loaded in full on [`open`](Self::open) and saved in full after every
/// change. A failed save rolls the in-memory list back, so memory and disk
/// never disagree about what was recorded.
pub struct SessionStore {
    backend: Arc<dyn HistoryStore>,
    sessions: Vec<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl SessionStore {
    /// Load history from `backend`.
    #[instrument(skip(backend))]
    pub async fn open(backend: Arc<dyn HistoryStore>) -> StorageResult<Self> {
        let sessions = backend.load_all().await?;
        info!(sessions = sessions.len(), "Session history loaded");
        Ok(Self { backend, sessions })
    }

    /// Record `session` as the most recent entry and persist.
    #[instrument(skip(self, session), fields(id = %session.id()))]
    pub async fn append(&mut self, session: Session) -> StorageResult<()> {
        self.sessions.insert(0, session);
        if let Err(e) = self.backend.save_all(&self.sessions).await {
            self.sessions.remove(0);
            return Err(e);
        }
        info!(sessions = self.sessions.len(), "Session appended");
        Ok(())
    }

    /// Delete a session and persist, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if no session has this id.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &SessionId) -> StorageResult<Session> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::SessionNotFound(id.to_string())))?;

        let removed = self.sessions.remove(index);
        if let Err(e) = self.backend.save_all(&self.sessions).await {
            self.sessions.insert(index, removed);
            return Err(e);
        }
        info!(sessions = self.sessions.len(), "Session removed");
        Ok(removed)
    }

    /// Look up a session by id.
    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// Sessions, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    /// Sessions as a slice, most recent first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether history is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
