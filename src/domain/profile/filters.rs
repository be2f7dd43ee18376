//! Query filters handed to storage.
//!
//! Filters only describe a selection; how bounds and label matches are
//! evaluated is up to the storage backend.

use super::{Labels, ProfileType};
use crate::domain::foundation::Timestamp;

/// Selects service registrations by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetServicesFilter {
    pub service: String,
}

/// Selects stored profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProfileFilter {
    pub service: String,
    pub profile_type: ProfileType,
    pub labels: Labels,
    pub created_at_min: Timestamp,
    pub created_at_max: Timestamp,
    /// Maximum number of profiles to return; `None` leaves it to storage.
    pub limit: Option<usize>,
}
