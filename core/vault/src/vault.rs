//! Vault operations over the metadata and blob stores.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::access;
use crate::config::VaultConfig;
use lockbox_common::{Error, ObjectId, PrincipalId, Result};
use lockbox_crypto::{open, seal};
use lockbox_storage::{BlobStore, BlobStoreRegistry, MetadataStore, ObjectRecord};

/// The record projection exposed to callers.
///
/// Carries descriptive metadata only; envelope fields and the storage key
/// never leave the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object id.
    pub id: ObjectId,
    /// Caller-supplied file name.
    pub filename: String,
    /// Caller-supplied MIME type.
    pub mime_type: String,
    /// Plaintext size in bytes.
    pub size_bytes: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&ObjectRecord> for ObjectSummary {
    fn from(record: &ObjectRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename.clone(),
            mime_type: record.mime_type.clone(),
            size_bytes: record.size_bytes,
            created_at: record.created_at,
        }
    }
}

/// Encrypted object vault.
///
/// Orchestrates the metadata store and the blob store: every stored object
/// is sealed under its own key, the ciphertext goes to the blob store, and
/// the envelope header travels with the metadata record. The vault owns the
/// protocol joining the two stores, not the stores themselves.
pub struct Vault {
    metadata: Arc<dyn MetadataStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Vault {
    /// Create a vault over the given stores.
    pub fn new(metadata: Arc<dyn MetadataStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { metadata, blobs }
    }

    /// Create a vault with the blob backend resolved from configuration.
    ///
    /// # Errors
    /// - Backend not registered
    /// - Backend configuration invalid
    pub fn from_config(
        registry: &BlobStoreRegistry,
        config: &VaultConfig,
        metadata: Arc<dyn MetadataStore>,
    ) -> Result<Self> {
        let blobs = registry.resolve(&config.blob_store, config.blob_config.clone())?;
        info!(backend = %blobs.name(), "Vault assembled");
        Ok(Self::new(metadata, blobs))
    }

    /// Encrypt and store a new object.
    ///
    /// # Postconditions
    /// - Ciphertext is in the blob store, sealed under a key used for no
    ///   other object
    /// - The metadata record (envelope header included) is observable by
    ///   `retrieve`
    ///
    /// # Errors
    /// - `Crypto` on cipher failure (nothing written)
    /// - `Storage` on blob write failure (no record written)
    /// - Metadata insert failure after a successful blob write triggers a
    ///   compensating delete of the just-written blob
    pub async fn create(
        &self,
        owner: &PrincipalId,
        filename: &str,
        mime_type: &str,
        plaintext: &[u8],
    ) -> Result<ObjectSummary> {
        debug!(owner = %owner, size = plaintext.len(), "Creating object");

        let envelope = seal(&mut OsRng, plaintext)?;
        let (ciphertext, header) = envelope.split();

        let storage_key = self.blobs.put(ciphertext).await?;

        let record = ObjectRecord {
            id: ObjectId::new(),
            owner_id: owner.clone(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: plaintext.len() as u64,
            storage_key: storage_key.clone(),
            envelope: header,
            shared_with: HashSet::new(),
            created_at: Utc::now(),
        };
        let summary = ObjectSummary::from(&record);

        if let Err(err) = self.metadata.insert(record).await {
            warn!(object = %summary.id, "Metadata insert failed, removing just-written blob");
            if let Err(cleanup) = self.blobs.delete(&storage_key).await {
                error!(
                    object = %summary.id,
                    key = %storage_key,
                    error = %cleanup,
                    "Compensating blob delete failed, blob is orphaned"
                );
            }
            return Err(err);
        }

        info!(object = %summary.id, owner = %owner, size = summary.size_bytes, "Object created");
        Ok(summary)
    }

    /// Fetch and decrypt an object.
    ///
    /// The authorization check runs strictly before any blob read.
    ///
    /// # Errors
    /// - `NotFound` if no record exists
    /// - `AccessDenied` if the requester is neither owner nor share
    ///   recipient
    /// - `Authentication` if the stored ciphertext fails verification:
    ///   corruption or tampering, not a permission problem
    pub async fn retrieve(&self, requester: &PrincipalId, id: &ObjectId) -> Result<Vec<u8>> {
        debug!(object = %id, requester = %requester, "Retrieving object");

        let record = self.find_record(id).await?;
        access::ensure_read(&record, requester)?;

        let ciphertext = self.blobs.get(&record.storage_key).await?;

        let plaintext = match open(&record.envelope.reunite(ciphertext)) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                error!(object = %id, "Stored ciphertext failed authentication");
                return Err(err);
            }
        };

        debug!(object = %id, size = plaintext.len(), "Object retrieved");
        Ok(plaintext)
    }

    /// Get an object's descriptive metadata.
    ///
    /// Same authorization gate as `retrieve`; no blob access.
    pub async fn describe(&self, requester: &PrincipalId, id: &ObjectId) -> Result<ObjectSummary> {
        let record = self.find_record(id).await?;
        access::ensure_read(&record, requester)?;
        Ok(ObjectSummary::from(&record))
    }

    /// List all objects owned by a principal.
    pub async fn list_for_owner(&self, owner: &PrincipalId) -> Result<Vec<ObjectSummary>> {
        let records = self.metadata.find_by_owner(owner).await?;
        Ok(records.iter().map(ObjectSummary::from).collect())
    }

    /// Delete an object. Owner only; sharing grants no delete right.
    ///
    /// The blob is deleted before the record, so a mid-failure state is a
    /// reclaimable orphan blob rather than a record pointing at nothing.
    ///
    /// # Errors
    /// - `NotFound` if no record exists
    /// - `AccessDenied` for any non-owner
    /// - `Storage` if either delete fails
    pub async fn delete(&self, requester: &PrincipalId, id: &ObjectId) -> Result<()> {
        debug!(object = %id, requester = %requester, "Deleting object");

        let record = self.find_record(id).await?;
        access::ensure_owner(&record, requester)?;

        self.blobs.delete(&record.storage_key).await?;
        self.metadata.delete(id).await?;

        info!(object = %id, "Object deleted");
        Ok(())
    }

    /// Grant a principal read access. Owner only; idempotent.
    ///
    /// # Errors
    /// - `NotFound` if no record exists
    /// - `AccessDenied` for any non-owner, including share recipients
    pub async fn share_with(
        &self,
        requester: &PrincipalId,
        id: &ObjectId,
        target: &PrincipalId,
    ) -> Result<()> {
        let record = self.find_record(id).await?;
        access::ensure_owner(&record, requester)?;

        self.metadata.add_share(id, target).await?;

        info!(object = %id, principal = %target, "Object shared");
        Ok(())
    }

    async fn find_record(&self, id: &ObjectId) -> Result<ObjectRecord> {
        self.metadata
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Object not found: {}", id)))
    }
}
