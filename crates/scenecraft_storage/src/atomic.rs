//! Atomic file replacement.

use scenecraft_error::{StorageError, StorageErrorKind, StorageResult};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Write `data` to `path` through a sibling temp file and a rename.
///
/// Parent directories are created as needed. Readers observe either the old
/// file or the new one, never a partial write.
pub(crate) async fn write_atomic(path: &Path, data: &[u8]) -> StorageResult<()> {
    replace_file(path, data, None).await
}

/// Like [`write_atomic`], but the temp file is created owner-only (`0600` on
/// Unix) before any byte is written, so the content is never exposed.
pub(crate) async fn write_private(path: &Path, data: &[u8]) -> StorageResult<()> {
    replace_file(path, data, Some(0o600)).await
}

async fn replace_file(path: &Path, data: &[u8], mode: Option<u32>) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    let temp_path = path.with_extension("tmp");
    let write_error = |e: std::io::Error| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    };

    // A leftover temp file would keep its old mode; start from scratch.
    match tokio::fs::remove_file(&temp_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(write_error(e)),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    if let Some(mode) = mode {
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let written = async {
        let mut file = options.open(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await
    }
    .await;
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(write_error(e));
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        ))));
    }

    Ok(())
}

/// Read `path`, mapping a missing file to `None`.
pub(crate) async fn read_optional(path: &Path) -> StorageResult<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))),
    }
}
