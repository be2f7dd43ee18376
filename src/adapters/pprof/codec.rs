//! pprof codec: gzip-framed protobuf profiles.

use std::borrow::Cow;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use prost::Message;

use crate::domain::pprof::DecodedProfile;
use crate::ports::{CodecError, ProfileCodec};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Default cap on the protobuf size of a single profile.
pub const DEFAULT_MAX_DECODED_BYTES: usize = 64 * 1024 * 1024;

/// Codec for the pprof format.
///
/// Accepts gzip-compressed or raw protobuf on input and always writes
/// gzip-compressed protobuf, which is what `go tool pprof` expects.
/// Payloads larger than `max_decoded_bytes` once inflated are rejected.
#[derive(Debug, Clone, Copy)]
pub struct PprofCodec {
    compression: Compression,
    max_decoded_bytes: usize,
}

impl PprofCodec {
    pub fn new() -> Self {
        Self {
            compression: Compression::default(),
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
        }
    }

    /// Use the given gzip level (0-9) when writing.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression = Compression::new(level.min(9));
        self
    }

    /// Reject profiles whose protobuf form exceeds `limit` bytes.
    pub fn with_max_decoded_bytes(mut self, limit: usize) -> Self {
        self.max_decoded_bytes = limit;
        self
    }

    fn too_large(&self) -> CodecError {
        CodecError::Decode(format!(
            "profile too large: more than {} bytes decoded",
            self.max_decoded_bytes
        ))
    }
}

impl Default for PprofCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileCodec for PprofCodec {
    fn parse(&self, data: &[u8]) -> Result<DecodedProfile, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Decode("empty payload".to_string()));
        }

        let raw: Cow<'_, [u8]> = if data.starts_with(&GZIP_MAGIC) {
            let cap = u64::try_from(self.max_decoded_bytes)
                .unwrap_or(u64::MAX)
                .saturating_add(1);
            let mut buf = Vec::new();
            GzDecoder::new(data)
                .take(cap)
                .read_to_end(&mut buf)
                .map_err(|e| CodecError::Decode(format!("gzip: {}", e)))?;
            Cow::Owned(buf)
        } else {
            Cow::Borrowed(data)
        };
        if raw.len() > self.max_decoded_bytes {
            return Err(self.too_large());
        }

        let profile = DecodedProfile::decode(raw.as_ref())
            .map_err(|e| CodecError::Decode(format!("protobuf: {}", e)))?;
        profile.check_consistency().map_err(CodecError::Decode)?;
        Ok(profile)
    }

    fn write(&self, profile: &DecodedProfile, out: &mut dyn Write) -> Result<(), CodecError> {
        let mut encoder = GzEncoder::new(out, self.compression);
        encoder
            .write_all(&profile.encode_to_vec())
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(())
    }
}
