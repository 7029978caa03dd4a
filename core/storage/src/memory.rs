//! In-memory store backends for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use lockbox_common::{Error, ObjectId, PrincipalId, Result, StorageKey};
use crate::blob::BlobStore;
use crate::metadata::MetadataStore;
use crate::record::ObjectRecord;

/// In-memory blob store.
///
/// All data is held in memory and lost on drop.
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<StorageKey, Vec<u8>>>>,
}

impl MemoryBlobStore {
    /// Create a new empty memory blob store.
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().unwrap().len()
    }

    /// Check if the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn put(&self, data: Vec<u8>) -> Result<StorageKey> {
        let key = StorageKey::new(Uuid::new_v4().to_string())?;
        self.blobs.write().unwrap().insert(key.clone(), data);
        Ok(key)
    }

    async fn get(&self, key: &StorageKey) -> Result<Vec<u8>> {
        self.blobs
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Blob not found: {}", key)))
    }

    async fn delete(&self, key: &StorageKey) -> Result<()> {
        self.blobs
            .write()
            .unwrap()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Blob not found: {}", key)))
    }
}

/// In-memory metadata store.
///
/// Records live in a map behind a `RwLock`; `add_share` mutates the share
/// set under the write lock, which makes it an atomic set-add.
pub struct MemoryMetadataStore {
    records: Arc<RwLock<HashMap<ObjectId, ObjectRecord>>>,
}

impl MemoryMetadataStore {
    /// Create a new empty memory metadata store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryMetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn insert(&self, record: ObjectRecord) -> Result<ObjectId> {
        let mut records = self.records.write().unwrap();
        if records.contains_key(&record.id) {
            return Err(Error::AlreadyExists(format!(
                "Record already exists: {}",
                record.id
            )));
        }
        let id = record.id;
        records.insert(id, record);
        Ok(id)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<ObjectRecord>> {
        Ok(self.records.read().unwrap().get(id).cloned())
    }

    async fn find_by_owner(&self, owner: &PrincipalId) -> Result<Vec<ObjectRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .values()
            .filter(|record| record.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn add_share(&self, id: &ObjectId, principal: &PrincipalId) -> Result<()> {
        let mut records = self.records.write().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Record not found: {}", id)))?;
        record.shared_with.insert(principal.clone());
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<()> {
        self.records
            .write()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Record not found: {}", id)))
    }
}
