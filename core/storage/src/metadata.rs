//! Metadata store contract.

use async_trait::async_trait;

use lockbox_common::{ObjectId, PrincipalId, Result};
use crate::record::ObjectRecord;

/// Durable keyed store for object metadata records.
///
/// Any database that can persist an [`ObjectRecord`] by id satisfies this
/// contract; no schema is assumed. Implementations must make `add_share`
/// an atomic set-add so concurrent share grants on one object never lose
/// updates.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new record.
    ///
    /// # Postconditions
    /// - The record is durably stored and observable by `find_by_id`
    ///
    /// # Errors
    /// - `AlreadyExists` if a record with the same id is present
    /// - `Storage` on I/O failure
    async fn insert(&self, record: ObjectRecord) -> Result<ObjectId>;

    /// Look up a record by object id.
    ///
    /// Returns `None` when no record exists; absence is not an error at
    /// this layer.
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<ObjectRecord>>;

    /// All records owned by a principal.
    async fn find_by_owner(&self, owner: &PrincipalId) -> Result<Vec<ObjectRecord>>;

    /// Atomically add a principal to a record's share set.
    ///
    /// Idempotent: adding a principal already present is a no-op.
    ///
    /// # Errors
    /// - `NotFound` if the record is absent
    async fn add_share(&self, id: &ObjectId, principal: &PrincipalId) -> Result<()>;

    /// Delete a record.
    ///
    /// # Errors
    /// - `NotFound` if the record is absent
    async fn delete(&self, id: &ObjectId) -> Result<()>;
}
