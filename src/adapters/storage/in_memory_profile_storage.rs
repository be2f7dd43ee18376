//! In-Memory Profile Storage Adapter
//!
//! Keeps services and profiles in memory.
//! Useful for testing, development and single-node deployments where
//! losing data on restart is acceptable.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::pprof::DecodedProfile;
use crate::domain::profile::{
    GetProfileFilter, GetServicesFilter, Labels, Profile, Service,
};
use crate::ports::{ProfileStorage, StorageError};

const DEFAULT_MAX_QUERY_RESULTS: usize = 1000;

/// A profile with the service facets resolved at ingestion.
#[derive(Debug, Clone)]
struct StoredProfile {
    service: String,
    labels: Labels,
    profile: Profile,
    decoded: DecodedProfile,
}

impl StoredProfile {
    /// Time bounds are inclusive on both ends.
    fn matches(&self, filter: &GetProfileFilter) -> bool {
        self.service == filter.service
            && self.profile.profile_type == filter.profile_type
            && !self.profile.created_at.is_before(&filter.created_at_min)
            && !self.profile.created_at.is_after(&filter.created_at_max)
            && self.labels.contains_all(&filter.labels)
    }
}

/// In-memory storage for services and profiles
#[derive(Debug, Clone)]
pub struct InMemoryProfileStorage {
    services: Arc<RwLock<Vec<Service>>>,
    profiles: Arc<RwLock<Vec<StoredProfile>>>,
    max_query_results: usize,
}

impl InMemoryProfileStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::with_max_query_results(DEFAULT_MAX_QUERY_RESULTS)
    }

    /// Create a storage that caps unbounded queries at `max_query_results`
    pub fn with_max_query_results(max_query_results: usize) -> Self {
        Self {
            services: Arc::new(RwLock::new(Vec::new())),
            profiles: Arc::new(RwLock::new(Vec::new())),
            max_query_results,
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.services.write().await.clear();
        self.profiles.write().await.clear();
    }

    /// Get the number of stored service registrations
    pub async fn service_count(&self) -> usize {
        self.services.read().await.len()
    }

    /// Get the number of stored profiles
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

impl Default for InMemoryProfileStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStorage for InMemoryProfileStorage {
    async fn create_service(&self, service: &Service) -> Result<(), StorageError> {
        let mut services = self.services.write().await;
        services.push(service.clone());
        Ok(())
    }

    async fn get_services(&self, filter: &GetServicesFilter) -> Result<Vec<Service>, StorageError> {
        let services = self.services.read().await;
        Ok(services
            .iter()
            .filter(|s| filter.service.is_empty() || s.name == filter.service)
            .cloned()
            .collect())
    }

    async fn create_profile(
        &self,
        profile: &Profile,
        decoded: &DecodedProfile,
    ) -> Result<(), StorageError> {
        let (service, labels) = {
            let services = self.services.read().await;
            let registered = services
                .iter()
                .find(|s| s.token == profile.service.token)
                .ok_or_else(|| {
                    StorageError::NotFound(format!(
                        "service with token {}",
                        profile.service.token
                    ))
                })?;
            (registered.name.clone(), registered.labels.clone())
        };

        let mut profiles = self.profiles.write().await;
        profiles.push(StoredProfile {
            service,
            labels,
            profile: profile.clone(),
            decoded: decoded.clone(),
        });
        Ok(())
    }

    async fn get_profiles(
        &self,
        filter: &GetProfileFilter,
    ) -> Result<Vec<DecodedProfile>, StorageError> {
        let limit = filter.limit.unwrap_or(self.max_query_results);
        let profiles = self.profiles.read().await;
        Ok(profiles
            .iter()
            .filter(|p| p.matches(filter))
            .take(limit)
            .map(|p| p.decoded.clone())
            .collect())
    }

    async fn get_profile(&self, filter: &GetProfileFilter) -> Result<DecodedProfile, StorageError> {
        let profiles = self.profiles.read().await;
        let mut matches = profiles.iter().filter(|p| p.matches(filter));

        let first = matches.next().ok_or_else(|| {
            StorageError::NotFound(format!(
                "{} profile for service {}",
                filter.profile_type, filter.service
            ))
        })?;

        let extra = matches.count();
        if extra > 0 {
            return Err(StorageError::MultipleMatches { count: extra + 1 });
        }
        Ok(first.decoded.clone())
    }
}
