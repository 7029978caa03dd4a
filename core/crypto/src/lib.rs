//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - Per-object authenticated encryption using AES-256-GCM
//! - The encrypted envelope and its serializable header form
//! - One-way hashing and secure random token generation
//!
//! # Security Guarantees
//! - Every object is sealed under a freshly generated key
//! - Key material is automatically zeroized on drop
//! - No plaintext or key material is ever logged
//! - Decryption verifies the authentication tag before returning anything

pub mod cipher;
pub mod envelope;
pub mod hash;
pub mod token;

pub use cipher::{
    generate_nonce, generate_nonce_with, open, seal, seal_with_key, EncryptedEnvelope, ObjectKey,
    KEY_LENGTH, NONCE_LENGTH, TAG_LENGTH,
};
pub use envelope::EnvelopeHeader;
pub use hash::sha256_hex;
pub use token::{generate_token, generate_token_with};
