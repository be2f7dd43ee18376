//! Typed requests accepted by the repository.
//!
//! Each request validates itself before the repository touches the codec
//! or storage.

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::profile::{GetProfileFilter, Labels, ProfileType};

/// Register a service build.
#[derive(Debug, Clone, Default)]
pub struct CreateServiceRequest {
    /// Build identity.
    pub id: String,
    pub service: String,
    pub labels: Labels,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        if self.service.is_empty() {
            return Err(ValidationError::empty_field("service"));
        }
        Ok(())
    }
}

/// List registrations of a service. An empty name lists every service.
#[derive(Debug, Clone, Default)]
pub struct GetServicesRequest {
    pub service: String,
}

/// Submit one profile sample for a registered service.
#[derive(Debug, Clone, Default)]
pub struct CreateProfileRequest {
    /// Build identity.
    pub id: String,
    pub token: String,
    pub profile_type: ProfileType,
}

impl CreateProfileRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        if self.token.is_empty() {
            return Err(ValidationError::empty_field("token"));
        }
        if self.profile_type.is_unknown() {
            return Err(ValidationError::UnknownProfileType);
        }
        Ok(())
    }
}

/// Select stored profiles of one service and type within a time range.
#[derive(Debug, Clone, Default)]
pub struct GetProfilesRequest {
    pub service: String,
    pub profile_type: ProfileType,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub labels: Labels,
    /// `None` or `Some(0)` means no limit.
    pub limit: Option<usize>,
}

impl GetProfilesRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_filter().map(|_| ())
    }

    /// Validates the request and builds the storage filter.
    pub fn to_filter(&self) -> Result<GetProfileFilter, ValidationError> {
        if self.service.is_empty() {
            return Err(ValidationError::empty_field("service"));
        }
        if self.profile_type.is_unknown() {
            return Err(ValidationError::UnknownProfileType);
        }
        let (from, to) = match (self.from, self.to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(ValidationError::MissingTimeRange),
        };
        if to.is_before(&from) {
            return Err(ValidationError::InvertedTimeRange);
        }

        Ok(GetProfileFilter {
            service: self.service.clone(),
            profile_type: self.profile_type,
            labels: self.labels.clone(),
            created_at_min: from,
            created_at_max: to,
            limit: self.limit.filter(|&n| n > 0),
        })
    }
}
