//! File-backed credential store.

use crate::CredentialStore;
use crate::atomic::{read_optional, write_private};
use async_trait::async_trait;
use scenecraft_core::ApiKey;
use scenecraft_error::{StorageError, StorageErrorKind, StorageResult};
use std::path::{Path, PathBuf};

/// Stores the API key as a single-line file.
///
/// On Unix the file is created owner-only (`0600`), including the temp file
/// it is written through.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self) -> StorageResult<Option<ApiKey>> {
        let Some(data) = read_optional(&self.path).await? else {
            return Ok(None);
        };
        let raw = String::from_utf8(data).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        Ok(ApiKey::parse(&raw))
    }

    #[tracing::instrument(skip(self, raw), fields(path = %self.path.display()))]
    async fn set(&self, raw: &str) -> StorageResult<()> {
        let key = ApiKey::parse(raw).ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidCredential(
                "API key must not be blank".to_string(),
            ))
        })?;

        write_private(&self.path, key.expose().as_bytes()).await?;

        tracing::info!("Saved API credential");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> StorageResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Removed API credential");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "remove {}: {}",
                self.path.display(),
                e
            )))),
        }
    }
}
