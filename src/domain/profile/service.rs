//! Service and Profile records exchanged with storage.

use serde::{Deserialize, Serialize};

use super::{Labels, ProfileType, Token};
use crate::domain::foundation::Timestamp;

/// A registered service build.
///
/// A logical service (same `name`) may be registered many times, once per
/// build or restart; queries fold those registrations together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub build_id: String,
    pub token: Token,
    pub labels: Labels,
}

impl Service {
    /// Creates a service record, deriving its token from name and build id.
    pub fn new(name: impl Into<String>, build_id: impl Into<String>, labels: Labels) -> Self {
        let name = name.into();
        let build_id = build_id.into();
        let token = Token::derive(&name, &build_id);
        Self {
            name,
            build_id,
            token,
            labels,
        }
    }
}

/// The part of a service a profile refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub build_id: String,
    pub token: Token,
}

/// Metadata of one submitted profile sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_type: ProfileType,
    pub service: ServiceRef,
    pub created_at: Timestamp,
}

impl Profile {
    pub fn new(
        profile_type: ProfileType,
        build_id: impl Into<String>,
        token: Token,
        created_at: Timestamp,
    ) -> Self {
        Self {
            profile_type,
            service: ServiceRef {
                build_id: build_id.into(),
                token,
            },
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_service_derives_token() {
        let service = Service::new("svc", "build-1", Labels::new());
        assert_eq!(service.token, Token::derive("svc", "build-1"));
    }

    #[test]
    fn profile_references_service_by_build_and_token() {
        let token = Token::from("abc");
        let profile = Profile::new(ProfileType::CPU, "build-1", token.clone(), Timestamp::now());

        assert_eq!(profile.service.build_id, "build-1");
        assert_eq!(profile.service.token, token);
    }
}
