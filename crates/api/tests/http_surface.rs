//! HTTP behaviour that needs no database: middleware, auth rejection,
//! routing.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_offline_app, get, get_auth, post_json};
use serde_json::json;

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let response = get(build_offline_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert_eq!(json["maps_configured"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(build_offline_app(), "/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_offline_app(), "/api/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let response = get(build_offline_app(), "/api/shoots").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let response = get_auth(build_offline_app(), "/api/user", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrongly_typed_body_is_400() {
    let body = json!({ "email": 5, "password": "hunter22" });
    let response = post_json(build_offline_app(), "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn invalid_registration_is_rejected_before_the_database() {
    let body = json!({ "email": "not-an-email", "password": "x", "displayName": "" });
    let response = post_json(build_offline_app(), "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["email"].is_array());
}
