//! Foundation module - Shared domain primitives.
//!
//! Contains the timestamp value object and the error vocabulary shared
//! by every layer of profstore.

mod errors;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use timestamp::Timestamp;
