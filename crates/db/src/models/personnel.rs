//! Personnel (photographers, cosplayers, assistants) available to a team.

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `personnel` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Personnel {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a personnel entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePersonnel {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub role: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "must be at most 40 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub instagram: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for updating a personnel entry. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePersonnel {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub role: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "must be at most 40 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub instagram: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}
