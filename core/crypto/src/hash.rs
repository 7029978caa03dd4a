//! One-way hashing for integrity fingerprints.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data` as a lowercase hex string.
///
/// Used for integrity fingerprints, not secrecy.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
