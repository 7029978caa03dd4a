//! Common error types for Lockbox.

use thiserror::Error;

/// Top-level error type for Lockbox operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Cryptographic primitive failed unexpectedly. Fatal, not retried.
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// Envelope failed authentication during decryption.
    ///
    /// Covers tampered ciphertext, a wrong key, and a corrupted nonce or tag
    /// as a single indistinguishable failure mode.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No record exists for the requested object.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record exists but the principal lacks rights to it.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Collaborator I/O failure (metadata or blob store).
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
