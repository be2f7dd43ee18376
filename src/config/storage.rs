//! Storage backend configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which storage backend to wire in
    #[serde(default)]
    pub backend: StorageBackend,

    /// Upper bound on profiles returned by an unlimited query
    #[serde(default = "default_max_query_results")]
    pub max_query_results: usize,
}

/// Available storage backends
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_query_results == 0 {
            return Err(ValidationError::InvalidQueryCap);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            max_query_results: default_max_query_results(),
        }
    }
}

fn default_max_query_results() -> usize {
    1000
}
