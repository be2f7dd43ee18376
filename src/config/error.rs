//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Profile body limit must be greater than zero")]
    InvalidBodyLimit,

    #[error("Query result cap must be greater than zero")]
    InvalidQueryCap,

    #[error("Invalid gzip compression level {0}, expected 0-9")]
    InvalidCompressionLevel(u32),

    #[error("Decoded profile limit must be greater than zero")]
    InvalidDecodedLimit,
}
