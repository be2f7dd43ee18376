//! Integration tests for the HTTP surface.
//!
//! These tests drive the assembled application router in-process:
//! 1. Service registration and listing
//! 2. Raw profile upload
//! 3. Zip export and single profile download
//! 4. Error status mapping

use std::io::{Cursor, Read};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use profstore::adapters::http::{app_router, ProfilesAppState};
use profstore::adapters::pprof::PprofCodec;
use profstore::adapters::storage::InMemoryProfileStorage;
use profstore::application::Repository;
use profstore::config::ServerConfig;
use profstore::domain::pprof::{DecodedProfile, Sample, ValueType};
use profstore::ports::ProfileCodec;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let repository = Repository::new(
        Arc::new(InMemoryProfileStorage::new()),
        Arc::new(PprofCodec::new()),
    );
    app_router(
        ProfilesAppState::new(Arc::new(repository)),
        &ServerConfig::default(),
    )
}

fn heap_payload() -> Vec<u8> {
    let profile = DecodedProfile {
        sample_types: vec![ValueType { r#type: 1, unit: 2 }],
        samples: vec![Sample {
            location_ids: vec![1],
            values: vec![4096],
            labels: vec![],
        }],
        string_table: vec![String::new(), "inuse_space".into(), "bytes".into()],
        ..Default::default()
    };
    let mut out = Vec::new();
    PprofCodec::new().write(&profile, &mut out).unwrap();
    out
}

/// Query string fragment covering the last hour.
fn last_hour() -> String {
    let now = Utc::now();
    format!(
        "from={}&to={}",
        (now - Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true),
        (now + Duration::minutes(1)).to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn register(app: &Router, service: &str, id: &str, labels: &str) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/0/services")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "service": service, "id": id, "labels": labels }).to_string(),
        ))
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    let value: Value = serde_json::from_slice(&body).unwrap();
    value["token"].as_str().unwrap().to_string()
}

async fn upload(app: &Router, id: &str, token: &str, profile_type: &str) -> StatusCode {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!(
            "/api/0/profiles?id={}&token={}&type={}",
            id, token, profile_type
        ))
        .body(Body::from(heap_payload()))
        .unwrap();
    send(app, request).await.0
}

fn get(uri: String) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn listed_service_carries_merged_labels() {
    let app = app();
    register(&app, "svc", "build-1", "env=prod").await;
    register(&app, "svc", "build-2", "region=us").await;

    let (status, body) = send(&app, get("/api/0/services?service=svc".to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let services: Value = serde_json::from_slice(&body).unwrap();
    let services = services.as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "svc");

    let labels = services[0]["labels"].as_str().unwrap();
    assert!(labels.contains("env=prod"));
    assert!(labels.contains("region=us"));
}

#[tokio::test]
async fn uploaded_profiles_export_as_zip() {
    let app = app();
    let token = register(&app, "svc", "build-1", "").await;
    assert_eq!(upload(&app, "build-1", &token, "heap").await, StatusCode::CREATED);
    assert_eq!(upload(&app, "build-1", &token, "heap").await, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get(format!(
            "/api/0/profiles?service=svc&type=heap&{}",
            last_hour()
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/zip"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(body.to_vec())).unwrap();
    assert_eq!(archive.len(), 2);

    let mut first = archive.by_index(0).unwrap();
    assert_eq!(first.name(), "svc-heap-0001.prof");
    let mut bytes = Vec::new();
    first.read_to_end(&mut bytes).unwrap();
    assert!(PprofCodec::new().parse(&bytes).is_ok());
}

#[tokio::test]
async fn single_profile_downloads_as_pprof() {
    let app = app();
    let token = register(&app, "svc", "build-1", "").await;
    upload(&app, "build-1", &token, "heap").await;

    let (status, body) = send(
        &app,
        get(format!(
            "/api/0/profile?service=svc&type=heap&{}",
            last_hour()
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let profile = PprofCodec::new().parse(&body).unwrap();
    assert_eq!(profile.samples[0].values, vec![4096]);
}

#[tokio::test]
async fn ambiguous_single_profile_is_a_conflict() {
    let app = app();
    let token = register(&app, "svc", "build-1", "").await;
    upload(&app, "build-1", &token, "heap").await;
    upload(&app, "build-1", &token, "heap").await;

    let (status, body) = send(
        &app,
        get(format!(
            "/api/0/profile?service=svc&type=heap&{}",
            last_hour()
        )),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "AMBIGUOUS_MATCH");
}

#[tokio::test]
async fn garbage_upload_is_a_bad_request() {
    let app = app();
    let token = register(&app, "svc", "build-1", "").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/0/profiles?id=build-1&token={}&type=cpu", token))
        .body(Body::from("not a profile"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "DECODE_FAILED");
}

#[tokio::test]
async fn unknown_profile_type_is_a_bad_request() {
    let app = app();
    let token = register(&app, "svc", "build-1", "").await;

    assert_eq!(
        upload(&app, "build-1", &token, "threads").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn unregistered_token_is_not_found() {
    let app = app();

    assert_eq!(
        upload(&app, "build-1", "0123456789abcdef0123", "cpu").await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn query_without_time_range_is_a_bad_request() {
    let app = app();

    let (status, _) = send(&app, get("/api/0/profiles?service=svc&type=cpu".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let repository = Repository::new(
        Arc::new(InMemoryProfileStorage::new()),
        Arc::new(PprofCodec::new()),
    );
    let config = ServerConfig {
        max_profile_bytes: 16,
        ..Default::default()
    };
    let app = app_router(ProfilesAppState::new(Arc::new(repository)), &config);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/0/profiles?id=build-1&token=tok&type=cpu")
        .body(Body::from(vec![0u8; 1024]))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
