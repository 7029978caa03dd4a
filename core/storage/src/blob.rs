//! Blob store contract.

use async_trait::async_trait;

use lockbox_common::{Result, StorageKey};

/// Opaque content store for ciphertext bytes.
///
/// A blob store holds authenticated ciphertext and nothing else: no keys,
/// no nonces, no metadata. Keys are issued by the store on write and carry
/// no directory semantics. The threat model assumes a backend may corrupt
/// or substitute content; the vault layer detects that through the
/// envelope's authentication tag, so backends need not be trusted for
/// integrity.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Get the backend name (e.g., "memory", "local").
    fn name(&self) -> &str;

    /// Write a blob, returning its locator.
    ///
    /// # Errors
    /// - `Storage` on I/O failure
    async fn put(&self, data: Vec<u8>) -> Result<StorageKey>;

    /// Read a blob by locator.
    ///
    /// # Errors
    /// - `NotFound` if no blob exists under the key
    /// - `Storage` on I/O failure
    async fn get(&self, key: &StorageKey) -> Result<Vec<u8>>;

    /// Delete a blob by locator.
    ///
    /// # Errors
    /// - `NotFound` if no blob exists under the key
    /// - `Storage` on I/O failure
    async fn delete(&self, key: &StorageKey) -> Result<()>;
}
