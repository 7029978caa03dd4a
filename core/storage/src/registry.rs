//! Blob store registry for config-driven backend resolution.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use lockbox_common::{Error, Result};
use crate::blob::BlobStore;

/// Factory function type for creating blob store backends.
pub type BlobStoreFactory = Box<dyn Fn(Value) -> Result<Arc<dyn BlobStore>> + Send + Sync>;

/// Registry of blob store factories.
///
/// Allows dynamic registration and resolution of blob backends by name
/// and configuration.
pub struct BlobStoreRegistry {
    factories: HashMap<String, BlobStoreFactory>,
}

impl BlobStoreRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// # Errors
    /// - Returns error if name is already registered
    pub fn register(&mut self, name: impl Into<String>, factory: BlobStoreFactory) -> Result<()> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::AlreadyExists(format!(
                "Backend '{}' is already registered",
                name
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Resolve a backend by name and configuration.
    ///
    /// # Errors
    /// - Backend not found
    /// - Configuration invalid
    pub fn resolve(&self, name: &str, config: Value) -> Result<Arc<dyn BlobStore>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Backend '{}' is not registered", name)))?;
        factory(config)
    }

    /// Get list of registered backend names.
    pub fn backends(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Check if a backend is registered.
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for BlobStoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with the default backends.
pub fn create_default_registry() -> BlobStoreRegistry {
    let mut registry = BlobStoreRegistry::new();

    // Memory backend (testing and development)
    registry
        .register(
            "memory",
            Box::new(|_config| Ok(Arc::new(crate::memory::MemoryBlobStore::new()) as _)),
        )
        .expect("Failed to register memory backend");

    // Local filesystem backend
    registry
        .register(
            "local",
            Box::new(|config| {
                let root = config
                    .get("root")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        Error::InvalidInput("Local backend requires 'root' path".to_string())
                    })?;
                Ok(Arc::new(crate::local::LocalBlobStore::new(root)?) as _)
            }),
        )
        .expect("Failed to register local backend");

    registry
}
