//! Shoot locations, optionally geocoded.

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Identifier from the place-autocomplete provider.
    pub place_id: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a location.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLocation {
    #[validate(
        length(min = 1, max = 200, message = "must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: Option<f64>,
    pub place_id: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for updating a location. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLocation {
    #[validate(
        length(min = 1, max = 200, message = "must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: Option<f64>,
    pub place_id: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for `POST /locations/from-place`: create a location from an
/// autocomplete suggestion.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLocationFromPlace {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub place_id: String,
    /// Overrides the provider's place name.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    pub notes: Option<String>,
}
