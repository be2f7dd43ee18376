//! Storage Adapters
//!
//! Implementations of the ProfileStorage port.
//!
//! ## Available Adapters
//!
//! - **InMemoryProfileStorage** - Stores services and profiles in memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryProfileStorage;
//!
//! let storage = InMemoryProfileStorage::with_max_query_results(500);
//! ```

mod in_memory_profile_storage;

pub use in_memory_profile_storage::InMemoryProfileStorage;
