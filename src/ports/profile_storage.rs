//! Profile Storage Port - persistence contract for services and profiles.
//!
//! The repository validates every request before reaching this port, so
//! implementations can assume non-empty identifiers, a known profile
//! type and an ordered time range.

use async_trait::async_trait;

use crate::domain::pprof::DecodedProfile;
use crate::domain::profile::{GetProfileFilter, GetServicesFilter, Profile, Service};

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Filter matched {count} profiles, expected exactly one")]
    MultipleMatches { count: usize },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for persisting and querying services and profiles.
///
/// Implementations must be safe for concurrent use. Cancellation is
/// expressed by dropping the returned future; implementations must not
/// leave partially written records behind when that happens mid-call.
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Persist a service registration.
    ///
    /// Repeated registrations of the same service are all kept; callers
    /// fold them together on read.
    async fn create_service(&self, service: &Service) -> Result<(), StorageError>;

    /// List every registration matching the filter.
    async fn get_services(&self, filter: &GetServicesFilter) -> Result<Vec<Service>, StorageError>;

    /// Persist a profile together with its decoded payload.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if the backend checks token
    /// existence and the token was never registered.
    async fn create_profile(
        &self,
        profile: &Profile,
        decoded: &DecodedProfile,
    ) -> Result<(), StorageError>;

    /// Return all profiles matching the filter, oldest first.
    async fn get_profiles(
        &self,
        filter: &GetProfileFilter,
    ) -> Result<Vec<DecodedProfile>, StorageError>;

    /// Return the single profile matching the filter.
    ///
    /// # Errors
    /// - `StorageError::NotFound` when nothing matches
    /// - `StorageError::MultipleMatches` when more than one profile matches
    async fn get_profile(&self, filter: &GetProfileFilter) -> Result<DecodedProfile, StorageError>;
}
