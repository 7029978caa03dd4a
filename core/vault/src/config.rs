//! Vault configuration.

use serde::{Deserialize, Serialize};

use lockbox_common::{Error, Result};

/// Configuration for assembling a vault.
///
/// Names the blob backend and carries its backend-specific settings; the
/// metadata store is wired in by the surrounding system and has no
/// configuration here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Blob backend name (e.g., "memory", "local").
    pub blob_store: String,
    /// Backend-specific configuration.
    #[serde(default)]
    pub blob_config: serde_json::Value,
}

impl VaultConfig {
    /// Configuration using the in-memory blob backend.
    pub fn memory() -> Self {
        Self {
            blob_store: "memory".to_string(),
            blob_config: serde_json::Value::Null,
        }
    }

    /// Configuration using the local filesystem blob backend.
    pub fn local(root: impl Into<String>) -> Self {
        Self {
            blob_store: "local".to_string(),
            blob_config: serde_json::json!({ "root": root.into() }),
        }
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serialize configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
