//! Handlers for `/auth` (register, login, refresh, logout).
//!
//! Successful authentication returns the tokens in the JSON body and also
//! sets the access token as an `HttpOnly` cookie for browser clients.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shootboard_core::error::CoreError;
use shootboard_db::models::session::CreateSession;
use shootboard_db::models::user::{CreateUser, User, UserResponse};
use shootboard_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::auth::{AuthUser, ACCESS_TOKEN_COOKIE};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub display_name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens plus the signed-in user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

type AuthReply = (
    StatusCode,
    [(axum::http::HeaderName, String); 1],
    Json<DataResponse<AuthResponse>>,
);

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and sign it in. A taken email is 409.
pub async fn register(
    State(state): State<AppState>,
    NormalizedJson(input): NormalizedJson<RegisterRequest>,
) -> AppResult<AuthReply> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::field("password", msg))?;

    let display_name = input.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::field("display_name", "must not be blank"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_lowercase(),
            display_name: display_name.to_string(),
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    let response = create_auth_response(&state, &user).await?;
    Ok(reply(&state, StatusCode::CREATED, response))
}

/// POST /api/auth/login
///
/// Email and password for tokens. Unknown email and wrong password are the
/// same 401.
pub async fn login(
    State(state): State<AppState>,
    NormalizedJson(input): NormalizedJson<LoginRequest>,
) -> AppResult<AuthReply> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = create_auth_response(&state, &user).await?;
    Ok(reply(&state, StatusCode::OK, response))
}

/// POST /api/auth/refresh
///
/// Trade a refresh token for a new pair. The old session is revoked, so a
/// refresh token works once.
pub async fn refresh(
    State(state): State<AppState>,
    NormalizedJson(input): NormalizedJson<RefreshRequest>,
) -> AppResult<AuthReply> {
    let expired = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(expired)?;

    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(expired());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(reply(&state, StatusCode::OK, response))
}

/// POST /api/auth/logout
///
/// Revoke every session of the caller and clear the cookie. 204.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<(StatusCode, [(axum::http::HeaderName, String); 1])> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_cookie(state.config.secure_cookies))],
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access token, open a refresh session, and build the body.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.email, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            user_agent: None,
            ip_address: None,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}

fn reply(state: &AppState, status: StatusCode, response: AuthResponse) -> AuthReply {
    let cookie = access_cookie(
        &response.access_token,
        response.expires_in,
        state.config.secure_cookies,
    );
    (status, [(SET_COOKIE, cookie)], Json(DataResponse { data: response }))
}

/// `Set-Cookie` value carrying the access token.
fn access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the access token cookie.
fn clear_cookie(secure: bool) -> String {
    access_cookie("", 0, secure)
}
