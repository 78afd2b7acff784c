//! JSON file session history.

use crate::HistoryStore;
use crate::atomic::{read_optional, write_atomic};
use async_trait::async_trait;
use scenecraft_core::Session;
use scenecraft_error::{StorageError, StorageErrorKind, StorageResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Version tag written into every history file.
pub const HISTORY_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct HistoryFile<'a> {
    version: u32,
    sessions: Cow<'a, [Session]>,
}

/// Session history stored as one JSON document.
///
/// ```json
/// { "version": 1, "sessions": [ { "id": "…", "title": "…", … } ] }
/// ```
///
/// Images are embedded as base64, so the file round-trips every session
/// byte for byte.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Create a store backed by `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_all(&self) -> StorageResult<Vec<Session>> {
        let Some(data) = read_optional(&self.path).await? else {
            tracing::debug!("No history file yet, starting empty");
            return Ok(Vec::new());
        };

        let file: HistoryFile<'static> = serde_json::from_slice(&data).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        if file.version != HISTORY_FORMAT_VERSION {
            return Err(StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: unsupported history version {}",
                self.path.display(),
                file.version
            ))));
        }

        let sessions = file.sessions.into_owned();
        tracing::debug!(sessions = sessions.len(), "Loaded session history");
        Ok(sessions)
    }

    #[tracing::instrument(skip(self, sessions), fields(path = %self.path.display(), sessions = sessions.len()))]
    async fn save_all(&self, sessions: &[Session]) -> StorageResult<()> {
        let file = HistoryFile {
            version: HISTORY_FORMAT_VERSION,
            sessions: Cow::Borrowed(sessions),
        };
        let data = serde_json::to_vec_pretty(&file).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "failed to encode history: {}",
                e
            )))
        })?;

        write_atomic(&self.path, &data).await?;
        tracing::debug!("Saved session history");
        Ok(())
    }
}
