//! Shoot (planned photo session) model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shootboard_core::resources::ResourceKind;
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::{validate_hex_color, validate_not_blank, validate_shoot_status};
use sqlx::FromRow;
use validator::Validate;

use crate::models::costume::Costume;
use crate::models::equipment::Equipment;
use crate::models::location::Location;
use crate::models::participant::Participant;
use crate::models::prop::Prop;
use crate::models::reference::Reference;

/// A row from the `shoots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shoot {
    pub id: DbId,
    pub team_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Board column, see [`shootboard_core::shoot::BOARD_COLUMNS`].
    pub status: String,
    /// Zero-based card index within the status column.
    pub position: i32,
    pub shoot_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Primary location; additional locations live in `shoot_locations`.
    pub location_id: Option<DbId>,
    pub location_note: Option<String>,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub calendar_event_id: Option<String>,
    pub calendar_event_url: Option<String>,
    pub docs_url: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a shoot in the caller's active team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShoot {
    #[validate(
        length(min = 1, max = 200, message = "must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `idea` if omitted.
    #[validate(custom(function = "validate_shoot_status"))]
    pub status: Option<String>,
    pub shoot_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location_id: Option<DbId>,
    pub location_note: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for updating a shoot. All fields are optional.
///
/// A `status` here moves the card to the end of the new column; use
/// [`MoveShoot`] to choose the position.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShoot {
    #[validate(
        length(min = 1, max = 200, message = "must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_shoot_status"))]
    pub status: Option<String>,
    pub shoot_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location_id: Option<DbId>,
    pub location_note: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
}

/// DTO for `PATCH /shoots/{id}/status`: move a card on the board.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoveShoot {
    /// Destination column; omitted means the column after the current one.
    #[validate(custom(function = "validate_shoot_status"))]
    pub status: Option<String>,
    /// Target index in the destination column; appended when omitted.
    pub position: Option<i32>,
}

/// DTO for `PATCH /shoots/{id}/resources`.
///
/// Each provided list replaces the shoot's associations of that kind;
/// omitted lists are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShootResources {
    pub personnel_ids: Option<Vec<DbId>>,
    pub equipment_ids: Option<Vec<DbId>>,
    pub costume_ids: Option<Vec<DbId>>,
    pub prop_ids: Option<Vec<DbId>>,
    pub location_ids: Option<Vec<DbId>>,
}

impl UpdateShootResources {
    /// The lists that were provided, paired with their kind.
    pub fn provided(&self) -> Vec<(ResourceKind, &[DbId])> {
        [
            (ResourceKind::Personnel, &self.personnel_ids),
            (ResourceKind::Equipment, &self.equipment_ids),
            (ResourceKind::Costumes, &self.costume_ids),
            (ResourceKind::Props, &self.prop_ids),
            (ResourceKind::Locations, &self.location_ids),
        ]
        .into_iter()
        .filter_map(|(kind, ids)| ids.as_deref().map(|ids| (kind, ids)))
        .collect()
    }
}

/// Query parameters for `GET /shoots`.
#[derive(Debug, Default, Deserialize)]
pub struct ShootListParams {
    pub status: Option<String>,
    /// Case-insensitive substring match on the title.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A shoot with everything attached to it, returned by `GET /shoots/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ShootDetail {
    #[serde(flatten)]
    pub shoot: Shoot,
    pub location: Option<Location>,
    pub participants: Vec<Participant>,
    pub equipment: Vec<Equipment>,
    pub costumes: Vec<Costume>,
    pub props: Vec<Prop>,
    pub locations: Vec<Location>,
    pub references: Vec<Reference>,
}

/// One kanban column.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: &'static str,
    pub shoots: Vec<Shoot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provided_skips_omitted_lists() {
        let input = UpdateShootResources {
            equipment_ids: Some(vec![3, 4]),
            prop_ids: Some(vec![]),
            ..Default::default()
        };
        let sets = input.provided();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0], (ResourceKind::Equipment, &[3, 4][..]));
        assert_eq!(sets[1].0, ResourceKind::Props);
        assert!(sets[1].1.is_empty());
    }
}
