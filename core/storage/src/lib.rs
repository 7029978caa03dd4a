//! Store abstractions for Lockbox.
//!
//! This module provides the two collaborator contracts the vault core
//! consumes (a metadata store for object records and a blob store for
//! ciphertext) together with in-memory backends, a local filesystem blob
//! backend, and a registry for config-driven blob backend resolution.
//!
//! # Design Principles
//! - Backend isolation: no backend-specific logic in vault or crypto modules
//! - Async operations: all I/O operations are async
//! - Ciphertext only: a blob store never sees keys, nonces, tags or plaintext
//! - Unified error semantics: consistent error types across backends

pub mod blob;
pub mod local;
pub mod memory;
pub mod metadata;
pub mod record;
pub mod registry;

pub use blob::BlobStore;
pub use local::LocalBlobStore;
pub use memory::{MemoryBlobStore, MemoryMetadataStore};
pub use metadata::MetadataStore;
pub use record::ObjectRecord;
pub use registry::{create_default_registry, BlobStoreFactory, BlobStoreRegistry};
