//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PROFSTORE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use profstore::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod codec;
mod error;
mod server;
mod storage;

pub use codec::CodecConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, timeouts, body limit)
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration (backend, query cap)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Profile codec configuration (gzip level, decoded size cap)
    #[serde(default)]
    pub codec: CodecConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PROFSTORE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROFSTORE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PROFSTORE__STORAGE__MAX_QUERY_RESULTS=500` -> `storage.max_query_results = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROFSTORE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.codec.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("PROFSTORE__SERVER__PORT");
        env::remove_var("PROFSTORE__SERVER__ENVIRONMENT");
        env::remove_var("PROFSTORE__SERVER__REQUEST_TIMEOUT_SECS");
        env::remove_var("PROFSTORE__STORAGE__MAX_QUERY_RESULTS");
        env::remove_var("PROFSTORE__STORAGE__BACKEND");
        env::remove_var("PROFSTORE__CODEC__MAX_DECODED_BYTES");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 10100);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROFSTORE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROFSTORE__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_custom_query_cap() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROFSTORE__STORAGE__MAX_QUERY_RESULTS", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.max_query_results, 25);
    }

    #[test]
    fn test_custom_decoded_limit() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROFSTORE__CODEC__MAX_DECODED_BYTES", "1048576");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.codec.max_decoded_bytes, 1024 * 1024);
        assert_eq!(config.codec.compression_level, 6);
    }

    #[test]
    fn test_out_of_range_timeout_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROFSTORE__SERVER__REQUEST_TIMEOUT_SECS", "900");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
