//! Object metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use lockbox_common::{ObjectId, PrincipalId, StorageKey};
use lockbox_crypto::EnvelopeHeader;

/// Metadata record for one stored object.
///
/// Everything except `shared_with` is immutable after creation. The
/// envelope header (key, nonce, tag) is persisted here, deliberately apart
/// from the ciphertext the storage key points at; retrieval reunites the
/// two. Debug output redacts the key through `EnvelopeHeader`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Stable identifier, assigned at creation.
    pub id: ObjectId,
    /// Principal that created the object.
    pub owner_id: PrincipalId,
    /// Caller-supplied file name.
    pub filename: String,
    /// Caller-supplied MIME type.
    pub mime_type: String,
    /// Plaintext size in bytes.
    pub size_bytes: u64,
    /// Locator of the ciphertext in the blob store.
    pub storage_key: StorageKey,
    /// Key, nonce and tag needed to open the ciphertext.
    pub envelope: EnvelopeHeader,
    /// Principals granted read access. Owner-mutated only, no duplicates.
    pub shared_with: HashSet<PrincipalId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ObjectRecord {
    /// Check whether `principal` may read this object.
    ///
    /// Read access: the owner, or any principal in `shared_with`.
    pub fn can_read(&self, principal: &PrincipalId) -> bool {
        self.owner_id == *principal || self.shared_with.contains(principal)
    }

    /// Check whether `principal` owns this object.
    ///
    /// Ownership gates delete and share; sharing grants read only.
    pub fn is_owner(&self, principal: &PrincipalId) -> bool {
        self.owner_id == *principal
    }
}
