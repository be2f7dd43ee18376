//! pprof codec adapter

mod codec;

pub use codec::{PprofCodec, DEFAULT_MAX_DECODED_BYTES};
