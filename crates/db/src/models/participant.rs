//! Shoot participants: who is on set and in what capacity.

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `shoot_participants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub shoot_id: DbId,
    /// Set when the participant comes from the team's personnel list.
    pub personnel_id: Option<DbId>,
    pub name: String,
    pub role: Option<String>,
    pub character_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a participant.
///
/// Either `personnel_id` or `name` must be given; with a `personnel_id`
/// the name and role default to the personnel entry's.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParticipant {
    pub personnel_id: Option<DbId>,
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub role: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub character_name: Option<String>,
    pub notes: Option<String>,
}

/// Fully resolved insert values for a participant row.
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub personnel_id: Option<DbId>,
    pub name: String,
    pub role: Option<String>,
    pub character_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateParticipant {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub role: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub character_name: Option<String>,
    pub notes: Option<String>,
}
