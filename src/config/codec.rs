//! Profile codec configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Codec configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    /// gzip level (0-9) used when writing profiles out
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Largest accepted profile once inflated, in bytes
    #[serde(default = "default_max_decoded_bytes")]
    pub max_decoded_bytes: usize,
}

impl CodecConfig {
    /// Validate codec configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.compression_level > 9 {
            return Err(ValidationError::InvalidCompressionLevel(
                self.compression_level,
            ));
        }
        if self.max_decoded_bytes == 0 {
            return Err(ValidationError::InvalidDecodedLimit);
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
            max_decoded_bytes: default_max_decoded_bytes(),
        }
    }
}

fn default_compression_level() -> u32 {
    6
}

fn default_max_decoded_bytes() -> usize {
    64 * 1024 * 1024
}
