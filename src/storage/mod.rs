use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::models::{StorageError, StorageResult};

/// Durable single-key blob store backing the cart.
///
/// The store keeps the serialized cart under one key; the cart store owns
/// (de)serialization and writes the full blob on every committed mutation.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the blob stored under `key`, `None` when nothing was ever stored.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the blob stored under `key`.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// File-backed storage: each key maps to `<dir>/<key>.json`.
///
/// The data directory is created on first write. Keys must be plain file
/// stems; anything containing a path separator is rejected.
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CartStorage for FileCartStorage {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.blob_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(blob) => {
                debug!("Read {} bytes from {}", blob.len(), path.display());
                Ok(Some(blob))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.blob_path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, value).await?;
        debug!("Wrote blob to {}", path.display());
        Ok(())
    }
}

/// In-memory storage for tests and hosts without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob before handing the storage to a store under test.
    pub async fn seed(&self, key: &str, value: &str) {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CartStorage for MemoryCartStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
