//! HTTP handlers for service and profile endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{CreateProfileRequest, GetServicesRequest, Repository, RepositoryError};
use crate::domain::foundation::ErrorCode;

use super::dto::{
    CreateProfileQuery, CreateServiceBody, CreateServiceResponse, ErrorResponse, ProfilesQuery,
    ServiceResponse, ServicesQuery,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application state for profile endpoints.
#[derive(Clone)]
pub struct ProfilesAppState {
    pub repository: Arc<Repository>,
}

impl ProfilesAppState {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /services - Register a service build
pub async fn create_service(
    State(state): State<ProfilesAppState>,
    Json(body): Json<CreateServiceBody>,
) -> Response {
    let req = match body.into_request() {
        Ok(req) => req,
        Err(e) => return handle_repository_error(e.into()),
    };

    match state.repository.create_service(&req).await {
        Ok(token) => (StatusCode::CREATED, Json(CreateServiceResponse { token })).into_response(),
        Err(e) => handle_repository_error(e),
    }
}

/// GET /services?service= - List services with merged labels
pub async fn get_services(
    State(state): State<ProfilesAppState>,
    Query(query): Query<ServicesQuery>,
) -> Response {
    let req = GetServicesRequest {
        service: query.service,
    };

    match state.repository.get_services(&req).await {
        Ok(services) => {
            let mut response: Vec<ServiceResponse> =
                services.into_iter().map(ServiceResponse::from).collect();
            response.sort_by(|a, b| a.name.cmp(&b.name));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_repository_error(e),
    }
}

/// POST /profiles?id=&token=&type= - Submit a profile
pub async fn create_profile(
    State(state): State<ProfilesAppState>,
    Query(query): Query<CreateProfileQuery>,
    body: Bytes,
) -> Response {
    let req: CreateProfileRequest = query.into();
    match state.repository.create_profile(&req, &body).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => handle_repository_error(e),
    }
}

/// GET /profiles?service=&type=&from=&to=&labels=&limit= - Export as zip
pub async fn get_profiles(
    State(state): State<ProfilesAppState>,
    Query(query): Query<ProfilesQuery>,
) -> Response {
    let req = match query.into_request() {
        Ok(req) => req,
        Err(e) => return handle_repository_error(e.into()),
    };

    let mut archive = Vec::new();
    if let Err(e) = state.repository.get_profiles_to(&req, &mut archive).await {
        return handle_repository_error(e);
    }

    let disposition = format!(
        "attachment; filename=\"{}-{}.zip\"",
        req.service, req.profile_type
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive,
    )
        .into_response()
}

/// GET /profile?service=&type=&from=&to=&labels= - Fetch a single profile
pub async fn get_profile(
    State(state): State<ProfilesAppState>,
    Query(query): Query<ProfilesQuery>,
) -> Response {
    let req = match query.into_request() {
        Ok(req) => req,
        Err(e) => return handle_repository_error(e.into()),
    };

    let mut out = Vec::new();
    if let Err(e) = state.repository.get_profile_to(&req, &mut out).await {
        return handle_repository_error(e);
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        out,
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_repository_error(error: RepositoryError) -> Response {
    let status = match error.code() {
        ErrorCode::ValidationFailed | ErrorCode::DecodeFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AmbiguousMatch => StatusCode::CONFLICT,
        ErrorCode::StorageError | ErrorCode::WriteFailed => {
            tracing::error!("profile request failed: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}
