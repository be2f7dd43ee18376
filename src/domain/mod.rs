//! Domain layer containing business types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamp, errors)
//! - `profile` - Profile types, service identity, labels, records and filters
//! - `pprof` - Decoded profile messages

pub mod foundation;
pub mod pprof;
pub mod profile;
