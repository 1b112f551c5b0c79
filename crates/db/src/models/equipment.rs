//! Equipment (cameras, lenses, lighting) owned by a team.

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub quantity: i32,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an equipment entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEquipment {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(length(max = 60, message = "must be at most 60 characters"))]
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Defaults to 1 if omitted.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for updating an equipment entry. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEquipment {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 60, message = "must be at most 60 characters"))]
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}
