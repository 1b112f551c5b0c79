//! Request body extraction.
//!
//! [`NormalizedJson`] accepts camelCase or snake_case keys, deserializes
//! into the snake_case DTO, and runs its `validator` rules, so handlers
//! receive input that is already well-formed.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shootboard_core::case::{convert_keys, KeyCase};
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor with key normalization and validation.
///
/// Rejections:
/// - unparseable JSON or a missing `Content-Type` -> 400 `BAD_REQUEST`
/// - valid JSON of the wrong shape -> 400 `BAD_REQUEST`
/// - DTO validation failure -> 400 `VALIDATION_ERROR` with per-field messages
#[derive(Debug, Clone)]
pub struct NormalizedJson<T>(pub T);

impl<S, T> FromRequest<S> for NormalizedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let value: T = parse_body(raw)?;
        value.validate()?;
        Ok(NormalizedJson(value))
    }
}

/// Convert keys to snake_case and deserialize.
fn parse_body<T: DeserializeOwned>(raw: Value) -> Result<T, AppError> {
    serde_json::from_value(convert_keys(raw, KeyCase::Snake))
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        shoot_date: Option<String>,
        location_id: Option<i64>,
    }

    #[test]
    fn camel_case_keys_reach_snake_case_fields() {
        let parsed: Sample =
            parse_body(json!({ "shootDate": "2026-11-02", "locationId": 7 })).unwrap();
        assert_eq!(parsed.shoot_date.as_deref(), Some("2026-11-02"));
        assert_eq!(parsed.location_id, Some(7));
    }

    #[test]
    fn snake_case_keys_pass_through() {
        let parsed: Sample = parse_body(json!({ "location_id": 3 })).unwrap();
        assert_eq!(parsed.location_id, Some(3));
        assert!(parsed.shoot_date.is_none());
    }

    #[test]
    fn wrong_shape_is_bad_request() {
        let result = parse_body::<Sample>(json!({ "locationId": "seven" }));
        assert_matches!(result, Err(AppError::BadRequest(msg)) if msg.starts_with("Invalid request body"));
    }
}
