//! ProfileCodec port for decoding submitted profiles and serializing stored ones

use std::io::Write;

use crate::domain::pprof::DecodedProfile;

/// Errors raised by a profile codec
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("could not decode profile: {0}")]
    Decode(String),

    #[error("could not encode profile: {0}")]
    Encode(String),
}

/// Binary profile codec
pub trait ProfileCodec: Send + Sync {
    /// Decode a submitted payload
    fn parse(&self, data: &[u8]) -> Result<DecodedProfile, CodecError>;

    /// Serialize a profile in its native form
    fn write(&self, profile: &DecodedProfile, out: &mut dyn Write) -> Result<(), CodecError>;
}
