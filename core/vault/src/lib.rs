//! Vault core for Lockbox.
//!
//! This module provides:
//! - Object creation: encrypt, store ciphertext, record metadata
//! - Retrieval with an authorization gate ahead of any blob read
//! - Deletion and owner-controlled sharing
//! - Vault configuration for blob backend selection
//!
//! # Architecture
//! The vault core owns the protocol by which the metadata store and the
//! blob store are written and read together; it owns neither store. All
//! encryption and decryption happens here, through `lockbox-crypto`, so
//! collaborators only ever see ciphertext.

pub mod access;
pub mod config;
pub mod vault;

pub use config::VaultConfig;
pub use vault::{ObjectSummary, Vault};
