//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the repository and the outside world. Adapters implement these ports.
//!
//! - `ProfileStorage` - persistence of services and profiles
//! - `ProfileCodec` - parsing and serializing binary profiles

mod profile_codec;
mod profile_storage;

pub use profile_codec::{CodecError, ProfileCodec};
pub use profile_storage::{ProfileStorage, StorageError};
