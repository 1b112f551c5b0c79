//! Costumes (the character being cosplayed and its build progress).

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::{validate_not_blank, validate_progress};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `costumes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Costume {
    pub id: DbId,
    pub team_id: DbId,
    pub character_name: String,
    pub series: Option<String>,
    /// Build progress: `planned`, `in-progress`, or `complete`.
    pub status: String,
    pub estimated_cost: Option<f64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a costume.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCostume {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub character_name: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub series: Option<String>,
    /// Defaults to `planned` if omitted.
    #[validate(custom(function = "validate_progress"))]
    pub status: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub estimated_cost: Option<f64>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for updating a costume. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCostume {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub character_name: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub series: Option<String>,
    #[validate(custom(function = "validate_progress"))]
    pub status: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub estimated_cost: Option<f64>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}
