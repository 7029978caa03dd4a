//! Local filesystem blob store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use lockbox_common::{Error, Result, StorageKey};
use crate::blob::BlobStore;

/// Blob store backed by a local directory, one file per blob.
///
/// File names are freshly generated UUIDs, so the directory layout leaks
/// nothing about content or ownership.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a local blob store rooted at the given directory.
    ///
    /// # Postconditions
    /// - Root directory is created if it doesn't exist
    ///
    /// # Errors
    /// - Invalid path
    /// - Permission denied
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        // Create root if it doesn't exist (sync for constructor)
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
        }

        Ok(Self { root })
    }

    /// Resolve a storage key to a filesystem path.
    ///
    /// Keys this store issues are UUIDs; anything else is rejected so a
    /// corrupted or hostile key can never escape the root directory.
    fn to_fs_path(&self, key: &StorageKey) -> Result<PathBuf> {
        if Uuid::parse_str(key.as_str()).is_err() {
            return Err(Error::InvalidInput(format!(
                "Malformed storage key: {}",
                key
            )));
        }
        Ok(self.root.join(key.as_str()))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn put(&self, data: Vec<u8>) -> Result<StorageKey> {
        let key = StorageKey::new(Uuid::new_v4().to_string())?;
        let fs_path = self.to_fs_path(&key)?;

        fs::write(&fs_path, &data).await?;

        debug!(key = %key, size = data.len(), "Blob written");
        Ok(key)
    }

    async fn get(&self, key: &StorageKey) -> Result<Vec<u8>> {
        let fs_path = self.to_fs_path(key)?;

        if !fs_path.exists() {
            return Err(Error::NotFound(format!("Blob not found: {}", key)));
        }

        Ok(fs::read(&fs_path).await?)
    }

    async fn delete(&self, key: &StorageKey) -> Result<()> {
        let fs_path = self.to_fs_path(key)?;

        if !fs_path.exists() {
            return Err(Error::NotFound(format!("Blob not found: {}", key)));
        }

        fs::remove_file(&fs_path).await?;

        debug!(key = %key, "Blob deleted");
        Ok(())
    }
}
