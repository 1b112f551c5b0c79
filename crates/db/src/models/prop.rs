//! Props built or sourced for a shoot.

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::{validate_not_blank, validate_progress};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `props` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prop {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub status: String,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProp {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    /// Defaults to `planned` if omitted.
    #[validate(custom(function = "validate_progress"))]
    pub status: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProp {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "validate_progress"))]
    pub status: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}
