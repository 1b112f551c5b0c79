//! Handlers for items nested under a shoot: reference images and
//! participants.
//!
//! Each handler first checks that the shoot belongs to the caller's active
//! team; item ids are then matched within that shoot only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::participant::{
    CreateParticipant, NewParticipant, Participant, UpdateParticipant,
};
use shootboard_db::models::personnel::Personnel;
use shootboard_db::models::reference::{CreateReference, Reference, UpdateReference};
use shootboard_db::repositories::{ParticipantRepo, PersonnelRepo, ReferenceRepo};

use super::shoots::load_shoot;
use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

fn reference_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reference",
        id,
    })
}

/// GET /api/shoots/{id}/references
pub async fn list_references(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(shoot_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Reference>>>> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    let references = ReferenceRepo::list_for_shoot(&state.pool, shoot_id).await?;
    Ok(Json(DataResponse { data: references }))
}

/// POST /api/shoots/{id}/references
pub async fn create_reference(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(shoot_id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<CreateReference>,
) -> AppResult<(StatusCode, Json<DataResponse<Reference>>)> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    let reference = ReferenceRepo::create(&state.pool, shoot_id, &input).await?;
    tracing::info!(shoot_id, reference_id = reference.id, "Reference added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: reference })))
}

/// PATCH /api/shoots/{id}/references/{ref_id}
pub async fn update_reference(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path((shoot_id, ref_id)): Path<(DbId, DbId)>,
    NormalizedJson(input): NormalizedJson<UpdateReference>,
) -> AppResult<Json<DataResponse<Reference>>> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    let reference = ReferenceRepo::update(&state.pool, shoot_id, ref_id, &input)
        .await?
        .ok_or(reference_not_found(ref_id))?;
    Ok(Json(DataResponse { data: reference }))
}

/// DELETE /api/shoots/{id}/references/{ref_id}
pub async fn delete_reference(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path((shoot_id, ref_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    if ReferenceRepo::delete(&state.pool, shoot_id, ref_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(reference_not_found(ref_id))
    }
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

fn participant_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Participant",
        id,
    })
}

/// GET /api/shoots/{id}/participants
pub async fn list_participants(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(shoot_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Participant>>>> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    let participants = ParticipantRepo::list_for_shoot(&state.pool, shoot_id).await?;
    Ok(Json(DataResponse { data: participants }))
}

/// POST /api/shoots/{id}/participants
///
/// Either link a personnel entry (`personnel_id`, whose name and role are
/// the defaults) or add someone ad hoc by `name`. Linking the same person
/// twice is 409.
pub async fn create_participant(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(shoot_id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<CreateParticipant>,
) -> AppResult<(StatusCode, Json<DataResponse<Participant>>)> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;

    let person = match input.personnel_id {
        Some(personnel_id) => Some(
            PersonnelRepo::find_by_id(&state.pool, ctx.team_id, personnel_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Personnel",
                    id: personnel_id,
                }))?,
        ),
        None => None,
    };
    let new = resolve_participant(input, person.as_ref())?;

    let participant = ParticipantRepo::create(&state.pool, shoot_id, &new).await?;
    tracing::info!(
        shoot_id,
        participant_id = participant.id,
        personnel_id = ?participant.personnel_id,
        "Participant added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: participant })))
}

/// PATCH /api/shoots/{id}/participants/{pid}
pub async fn update_participant(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path((shoot_id, pid)): Path<(DbId, DbId)>,
    NormalizedJson(input): NormalizedJson<UpdateParticipant>,
) -> AppResult<Json<DataResponse<Participant>>> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    let participant = ParticipantRepo::update(&state.pool, shoot_id, pid, &input)
        .await?
        .ok_or(participant_not_found(pid))?;
    Ok(Json(DataResponse { data: participant }))
}

/// DELETE /api/shoots/{id}/participants/{pid}
pub async fn delete_participant(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path((shoot_id, pid)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_shoot(&state.pool, ctx.team_id, shoot_id).await?;
    if ParticipantRepo::delete(&state.pool, shoot_id, pid).await? {
        tracing::info!(shoot_id, participant_id = pid, "Participant removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(participant_not_found(pid))
    }
}

/// Fill in a participant's name and role, preferring explicit input over
/// the linked personnel entry.
fn resolve_participant(
    input: CreateParticipant,
    person: Option<&Personnel>,
) -> AppResult<NewParticipant> {
    let name = input
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| person.map(|p| p.name.clone()))
        .ok_or_else(|| AppError::field("name", "is required when personnel_id is not given"))?;

    Ok(NewParticipant {
        personnel_id: person.map(|p| p.id),
        name,
        role: input.role.or_else(|| person.and_then(|p| p.role.clone())),
        character_name: input.character_name,
        notes: input.notes,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn person() -> Personnel {
        Personnel {
            id: 9,
            team_id: 1,
            name: "Aki".into(),
            role: Some("photographer".into()),
            email: None,
            phone: None,
            instagram: None,
            notes: None,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(name: Option<&str>, role: Option<&str>) -> CreateParticipant {
        CreateParticipant {
            personnel_id: None,
            name: name.map(String::from),
            role: role.map(String::from),
            character_name: Some("Zelda".into()),
            notes: None,
        }
    }

    #[test]
    fn personnel_supplies_defaults() {
        let p = person();
        let new = resolve_participant(input(None, None), Some(&p)).unwrap();
        assert_eq!(new.personnel_id, Some(9));
        assert_eq!(new.name, "Aki");
        assert_eq!(new.role.as_deref(), Some("photographer"));
        assert_eq!(new.character_name.as_deref(), Some("Zelda"));
    }

    #[test]
    fn explicit_values_override_personnel() {
        let p = person();
        let new = resolve_participant(input(Some(" Aki K. "), Some("model")), Some(&p)).unwrap();
        assert_eq!(new.name, "Aki K.");
        assert_eq!(new.role.as_deref(), Some("model"));
    }

    #[test]
    fn ad_hoc_participant_needs_a_name() {
        assert_matches!(
            resolve_participant(input(None, None), None),
            Err(AppError::Validation(fields)) if fields.contains_key("name")
        );
        let new = resolve_participant(input(Some("Guest"), None), None).unwrap();
        assert_eq!(new.personnel_id, None);
        assert!(new.role.is_none());
    }
}
