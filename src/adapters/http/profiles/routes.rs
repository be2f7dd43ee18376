//! Axum router configuration for service and profile endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_profile, create_service, get_profile, get_profiles, get_services, ProfilesAppState,
};

/// Create the profiles API router.
///
/// # Routes
///
/// - `POST /services` - Register a service build, returns its token
/// - `GET /services` - List services (query: service)
/// - `POST /profiles` - Submit a profile (query: id, token, type; raw body)
/// - `GET /profiles` - Export matching profiles as a zip archive
/// - `GET /profile` - Fetch the single matching profile
///
/// Suitable for mounting at `/api/0`.
pub fn profiles_router(state: ProfilesAppState) -> Router {
    Router::new()
        .route("/services", post(create_service).get(get_services))
        .route("/profiles", post(create_profile).get(get_profiles))
        .route("/profile", get(get_profile))
        .with_state(state)
}
