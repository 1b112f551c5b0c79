//! Reference images pinned to a shoot (poses, lighting, character art).

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `shoot_references` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reference {
    pub id: DbId,
    pub shoot_id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReference {
    #[validate(url(message = "must be a valid URL"))]
    pub url: String,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub caption: Option<String>,
    /// Appended after existing references if omitted.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReference {
    #[validate(url(message = "must be a valid URL"))]
    pub url: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}
