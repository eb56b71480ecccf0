//! Local file system store

use crate::storage::StorageError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// One file per key under `base_path`
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_path: PathBuf,
}

impl LocalStore {
    /// Create a new local store, creating the directory if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = base_path.as_ref().to_path_buf();

        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to create storage directory {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("Local key-value store initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Read a value; a missing file is `None`
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("Failed to read '{}': {}", key, e))),
        }
    }

    /// Write a value through a temporary file and rename
    pub async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp_path = self.base_path.join(format!("{}.tmp", key));

        fs::write(&tmp_path, value)
            .await
            .map_err(|e| StorageError::Io(format!("Failed to write '{}': {}", key, e)))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::Io(format!("Failed to replace '{}': {}", key, e)))?;

        debug!(key = key, bytes = value.len(), "Stored value");
        Ok(())
    }

    /// Delete a value
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => {
                debug!(key = key, "Deleted value");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!("Failed to delete '{}': {}", key, e))),
        }
    }

    /// Health check
    pub async fn health_check(&self) -> Result<(), StorageError> {
        let test_file = self.base_path.join(".health_check");
        fs::write(&test_file, b"health_check")
            .await
            .map_err(|e| StorageError::Io(format!("Storage not writable: {}", e)))?;

        if let Err(e) = fs::remove_file(&test_file).await {
            warn!(path = %test_file.display(), error = %e, "Failed to remove health check file");
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}
