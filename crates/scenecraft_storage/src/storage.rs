//! Storage collaborator traits.

use async_trait::async_trait;
use scenecraft_core::{ApiKey, Session};
use scenecraft_error::StorageResult;

/// Persistent, whole-list session history.
///
/// History is loaded once at start and saved in full after every change.
/// Order is preserved exactly: most recent session first.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load every stored session. A store that was never written is empty.
    async fn load_all(&self) -> StorageResult<Vec<Session>>;

    /// Replace the stored list with `sessions`.
    async fn save_all(&self, sessions: &[Session]) -> StorageResult<()>;
}

/// Holder of the single engine API credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current credential, if one is saved.
    async fn get(&self) -> StorageResult<Option<ApiKey>>;

    /// Save a credential.
    ///
    /// The value is trimmed; blank input is rejected with
    /// [`StorageErrorKind::InvalidCredential`](scenecraft_error::StorageErrorKind::InvalidCredential).
    async fn set(&self, raw: &str) -> StorageResult<()>;

    /// Remove the saved credential. Clearing an empty store is not an error.
    async fn clear(&self) -> StorageResult<()>;

    /// Whether a credential is currently saved.
    async fn is_configured(&self) -> StorageResult<bool> {
        Ok(self.get().await?.is_some())
    }
}
