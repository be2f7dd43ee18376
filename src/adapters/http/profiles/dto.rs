//! HTTP DTOs for service and profile endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    CreateProfileRequest, CreateServiceRequest, GetProfilesRequest, RepositoryError,
};
use crate::domain::foundation::ValidationError;
use crate::domain::profile::{Labels, ProfileType, Service};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /services`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceBody {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub id: String,
    /// `k1=v1,k2=v2`
    #[serde(default)]
    pub labels: String,
}

impl CreateServiceBody {
    pub fn into_request(self) -> Result<CreateServiceRequest, ValidationError> {
        Ok(CreateServiceRequest {
            id: self.id,
            service: self.service,
            labels: self.labels.parse()?,
        })
    }
}

/// Query of `GET /services`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicesQuery {
    #[serde(default)]
    pub service: String,
}

/// Query of `POST /profiles`; the body carries the raw profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileQuery {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub token: String,
    #[serde(rename = "type", default)]
    pub profile_type: String,
}

impl From<CreateProfileQuery> for CreateProfileRequest {
    fn from(query: CreateProfileQuery) -> Self {
        CreateProfileRequest {
            id: query.id,
            token: query.token,
            profile_type: ProfileType::parse(&query.profile_type),
        }
    }
}

/// Query of `GET /profiles` and `GET /profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesQuery {
    #[serde(default)]
    pub service: String,
    #[serde(rename = "type", default)]
    pub profile_type: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub labels: Option<String>,
    pub limit: Option<usize>,
}

impl ProfilesQuery {
    pub fn into_request(self) -> Result<GetProfilesRequest, ValidationError> {
        let labels = match self.labels.as_deref() {
            Some(raw) => raw.parse()?,
            None => Labels::new(),
        };
        Ok(GetProfilesRequest {
            service: self.service,
            profile_type: ProfileType::parse(&self.profile_type),
            from: self.from.map(Into::into),
            to: self.to.map(Into::into),
            labels,
            limit: self.limit,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub name: String,
    pub build_id: String,
    pub token: String,
    pub labels: String,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            name: service.name,
            build_id: service.build_id,
            token: service.token.to_string(),
            labels: service.labels.to_string(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&RepositoryError> for ErrorResponse {
    fn from(error: &RepositoryError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}
