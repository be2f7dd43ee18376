//! HTTP adapters - REST API implementations.
//!
//! The profiles module exposes the repository; this module assembles it
//! into the full application router with the cross-cutting layers.

pub mod profiles;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

// Re-export key types for convenience
pub use profiles::profiles_router;
pub use profiles::ProfilesAppState;

/// Path prefix all API routes are mounted under.
pub const API_PREFIX: &str = "/api/0";

/// Build the application router.
///
/// Mounts the profile routes under [`API_PREFIX`] and applies request
/// tracing, the configured request timeout and the profile body limit.
pub fn app_router(state: ProfilesAppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest(API_PREFIX, profiles_router(state))
        .layer(DefaultBodyLimit::max(server.max_profile_bytes))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}
