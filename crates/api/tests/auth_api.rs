//! Registration, login, refresh, logout, and profile over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, register};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_tokens_and_sets_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "email": "Mika@Example.com",
        "password": "correct horse battery",
        "displayName": "Mika",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "mika@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "dup@example.com", "First").await;

    let body = json!({
        "email": "dup@example.com",
        "password": "another good one",
        "displayName": "Second",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "s@example.com", "password": "short", "displayName": "S" });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["password"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_accepts_right_password_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "login@example.com", "Login").await;

    let wrong = json!({ "email": "login@example.com", "password": "nope nope nope" });
    let response = post_json(app.clone(), "/api/auth/login", wrong).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let unknown = json!({ "email": "ghost@example.com", "password": "correct horse battery" });
    let response = post_json(app.clone(), "/api/auth/login", unknown).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let right = json!({ "email": "login@example.com", "password": "correct horse battery" });
    let response = post_json(app, "/api/auth/login", right).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_token_works_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "email": "r@example.com",
        "password": "correct horse battery",
        "displayName": "R",
    });
    let json = body_json(post_json(app.clone(), "/api/auth/register", body).await).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/auth/refresh",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["data"]["refresh_token"], refresh_token.as_str());

    let response = post_json(
        app,
        "/api/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "email": "out@example.com",
        "password": "correct horse battery",
        "displayName": "Out",
    });
    let json = body_json(post_json(app.clone(), "/api/auth/register", body).await).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_json_auth(app.clone(), "/api/auth/logout", json!({}), &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response =
        post_json(app, "/api/auth/refresh", json!({ "refreshToken": refresh })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_reflects_registration(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "me@example.com", "Me").await;

    let response = get_auth(app, "/api/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@example.com");
    assert_eq!(json["data"]["display_name"], "Me");
    assert!(json["data"].get("password_hash").is_none());
}
