use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shootboard_core::error::CoreError;
use shootboard_core::validation::{field_errors, summarize, FieldErrors};
use shootboard_google::GoogleApiError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// `{ "error": ..., "code": ... }`, plus `"fields"` for validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `shootboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Per-field validation failures from a request DTO.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(FieldErrors),

    /// A call to a Google API failed or is not configured.
    #[error(transparent)]
    Google(#[from] GoogleApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

impl AppError {
    /// A validation error on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Validation(fields) = &self {
            let body = json!({
                "error": summarize(fields),
                "code": "VALIDATION_ERROR",
                "fields": fields,
            });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::NoActiveTeam => (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "No active team".to_string(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream integrations ---
            AppError::Google(err) => classify_google_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Validation(_) => unreachable!("handled above"),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        conflict_message(constraint),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Client-facing message for a known unique constraint.
fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "An account with this email already exists".to_string(),
        "uq_team_members_team_user" => "User is already a member of this team".to_string(),
        "uq_shoot_participants_personnel" => {
            "This person is already a participant in the shoot".to_string()
        }
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Map a Google client failure. Missing configuration is a 503; a lookup
/// with no match is a 404; anything else is the upstream's fault (502).
fn classify_google_error(err: &GoogleApiError) -> (StatusCode, &'static str, String) {
    match err {
        GoogleApiError::NotConfigured(what) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            format!("{what} integration is not configured"),
        ),
        GoogleApiError::NoResults(query) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("No results for '{query}'"),
        ),
        GoogleApiError::Api { status: 401, .. } => (
            StatusCode::UNAUTHORIZED,
            "GOOGLE_UNAUTHORIZED",
            "Google rejected the access token; authorize again".to_string(),
        ),
        GoogleApiError::Api { status: 403, .. } => (
            StatusCode::FORBIDDEN,
            "GOOGLE_FORBIDDEN",
            "Google denied access to this resource".to_string(),
        ),
        GoogleApiError::Api { status, .. } => {
            tracing::warn!(error = %err, "Google API call failed");
            (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                format!("Upstream service returned status {status}"),
            )
        }
        GoogleApiError::Request(_) => {
            tracing::warn!(error = %err, "Google API request failed");
            (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "Upstream service is unreachable".to_string(),
            )
        }
        GoogleApiError::InvalidUrl(_) => {
            tracing::error!(error = %err, "Google client misconfigured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
