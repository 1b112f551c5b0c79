//! Handlers for `/shoots`: CRUD, the kanban board, and resource links.
//!
//! All lookups are scoped to the caller's active team, so another team's
//! shoot id behaves exactly like an unknown one (404).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::resources::ResourceKind;
use shootboard_core::shoot::{
    is_valid_status, next_status, validate_time_window, BOARD_COLUMNS, DEFAULT_STATUS,
};
use shootboard_core::types::DbId;
use shootboard_db::models::shoot::{
    BoardColumn, CreateShoot, MoveShoot, Shoot, ShootDetail, ShootListParams, UpdateShoot,
    UpdateShootResources,
};
use shootboard_db::repositories::{
    CostumeRepo, EquipmentRepo, LocationRepo, ParticipantRepo, PropRepo, ReferenceRepo,
    ShootRepo, ShootResourceRepo,
};
use shootboard_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Board and CRUD
// ---------------------------------------------------------------------------

/// GET /api/shoots?status=&q=&limit=&offset=
///
/// Soonest dated shoots first; undated shoots last.
pub async fn list(
    State(state): State<AppState>,
    ctx: TeamContext,
    Query(params): Query<ShootListParams>,
) -> AppResult<Json<DataResponse<Vec<Shoot>>>> {
    if let Some(status) = params.status.as_deref() {
        if !is_valid_status(status) {
            return Err(AppError::field(
                "status",
                "must be one of: idea, planning, ready-to-shoot, completed",
            ));
        }
    }
    let shoots = ShootRepo::list(&state.pool, ctx.team_id, &params).await?;
    Ok(Json(DataResponse { data: shoots }))
}

/// GET /api/shoots/board
///
/// One entry per column, in board order, each with its cards by position.
/// Empty columns are included.
pub async fn board(
    State(state): State<AppState>,
    ctx: TeamContext,
) -> AppResult<Json<DataResponse<Vec<BoardColumn>>>> {
    let shoots = ShootRepo::list_for_board(&state.pool, ctx.team_id).await?;
    Ok(Json(DataResponse {
        data: group_into_columns(shoots),
    }))
}

/// POST /api/shoots
///
/// The card is appended to its column (`idea` unless `status` is given).
pub async fn create(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreateShoot>,
) -> AppResult<(StatusCode, Json<DataResponse<Shoot>>)> {
    validate_time_window(input.start_time, input.end_time)
        .map_err(|msg| AppError::field("end_time", msg))?;
    if let Some(location_id) = input.location_id {
        ensure_location(&state.pool, ctx.team_id, location_id).await?;
    }

    let status = input.status.as_deref().unwrap_or(DEFAULT_STATUS);
    let shoot =
        ShootRepo::create(&state.pool, ctx.team_id, ctx.user.user_id, status, &input).await?;

    tracing::info!(
        team_id = ctx.team_id,
        shoot_id = shoot.id,
        status = %shoot.status,
        "Shoot created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: shoot })))
}

/// GET /api/shoots/{id}
///
/// The shoot with its primary location, participants, linked resources,
/// and references.
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShootDetail>>> {
    let shoot = load_shoot(&state.pool, ctx.team_id, id).await?;
    let detail = load_detail(&state.pool, ctx.team_id, shoot).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/shoots/{id}
///
/// A changed `status` moves the card to the end of the new column.
pub async fn update(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateShoot>,
) -> AppResult<Json<DataResponse<Shoot>>> {
    let current = load_shoot(&state.pool, ctx.team_id, id).await?;

    validate_time_window(
        input.start_time.or(current.start_time),
        input.end_time.or(current.end_time),
    )
    .map_err(|msg| AppError::field("end_time", msg))?;
    if let Some(location_id) = input.location_id {
        ensure_location(&state.pool, ctx.team_id, location_id).await?;
    }

    let mut shoot = ShootRepo::update(&state.pool, ctx.team_id, id, &input)
        .await?
        .ok_or(not_found(id))?;

    if let Some(status) = input.status.as_deref() {
        if status != shoot.status {
            shoot = ShootRepo::move_to(&state.pool, ctx.team_id, id, status, None)
                .await?
                .ok_or(not_found(id))?;
        }
    }

    tracing::info!(team_id = ctx.team_id, shoot_id = id, "Shoot updated");
    Ok(Json(DataResponse { data: shoot }))
}

/// DELETE /api/shoots/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ShootRepo::delete(&state.pool, ctx.team_id, id).await? {
        tracing::info!(team_id = ctx.team_id, shoot_id = id, "Shoot deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PATCH /api/shoots/{id}/status
///
/// Move a card to `status` at `position` (clamped; appended when omitted).
/// Without a `status` the card advances one column; a completed shoot
/// cannot advance (409).
pub async fn move_card(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<MoveShoot>,
) -> AppResult<Json<DataResponse<Shoot>>> {
    let status = match input.status {
        Some(status) => status,
        None => {
            let current = load_shoot(&state.pool, ctx.team_id, id).await?;
            next_status(&current.status)
                .ok_or_else(|| {
                    AppError::Core(CoreError::Conflict(format!(
                        "Shoot is already in the last column ({})",
                        current.status
                    )))
                })?
                .to_string()
        }
    };

    let shoot = ShootRepo::move_to(&state.pool, ctx.team_id, id, &status, input.position)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(
        team_id = ctx.team_id,
        shoot_id = id,
        status = %shoot.status,
        position = shoot.position,
        "Shoot moved"
    );
    Ok(Json(DataResponse { data: shoot }))
}

// ---------------------------------------------------------------------------
// Resource links
// ---------------------------------------------------------------------------

/// PATCH /api/shoots/{id}/resources
///
/// Each provided id list replaces that kind's links; omitted kinds are left
/// alone. All lists apply together or not at all. Responds with the
/// refreshed detail.
pub async fn replace_resources(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateShootResources>,
) -> AppResult<Json<DataResponse<ShootDetail>>> {
    let shoot = load_shoot(&state.pool, ctx.team_id, id).await?;

    let sets = input.provided();
    if let Some((kind, foreign)) =
        ShootResourceRepo::replace_many(&state.pool, ctx.team_id, id, &sets).await?
    {
        return Err(resource_not_found(kind, foreign));
    }

    tracing::info!(
        team_id = ctx.team_id,
        shoot_id = id,
        kinds = ?sets.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
        "Shoot resources replaced"
    );
    let detail = load_detail(&state.pool, ctx.team_id, shoot).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/shoots/{id}/resources/{kind}/{resource_id}
///
/// Idempotent. 204.
pub async fn attach_resource(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path((id, kind, resource_id)): Path<(DbId, String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    load_shoot(&state.pool, ctx.team_id, id).await?;

    if !ShootResourceRepo::attach(&state.pool, ctx.team_id, id, kind, resource_id).await? {
        return Err(resource_not_found(kind, resource_id));
    }
    tracing::info!(team_id = ctx.team_id, shoot_id = id, %kind, resource_id, "Resource attached");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/shoots/{id}/resources/{kind}/{resource_id}
///
/// 404 if the resource was not attached.
pub async fn detach_resource(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path((id, kind, resource_id)): Path<(DbId, String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    load_shoot(&state.pool, ctx.team_id, id).await?;

    if !ShootResourceRepo::detach(&state.pool, id, kind, resource_id).await? {
        return Err(resource_not_found(kind, resource_id));
    }
    tracing::info!(team_id = ctx.team_id, shoot_id = id, %kind, resource_id, "Resource detached");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Shoot", id })
}

fn resource_not_found(kind: ResourceKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.entity_name(),
        id,
    })
}

fn parse_kind(raw: &str) -> AppResult<ResourceKind> {
    ResourceKind::parse(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown resource kind '{raw}'. Expected one of: personnel, equipment, costumes, props, locations"
        ))
    })
}

/// The shoot, if it belongs to the team.
pub(crate) async fn load_shoot(pool: &DbPool, team_id: DbId, id: DbId) -> AppResult<Shoot> {
    ShootRepo::find_by_id(pool, team_id, id)
        .await?
        .ok_or(not_found(id))
}

/// Assemble the full detail view of a shoot.
pub(crate) async fn load_detail(
    pool: &DbPool,
    team_id: DbId,
    shoot: Shoot,
) -> AppResult<ShootDetail> {
    let location = match shoot.location_id {
        Some(location_id) => LocationRepo::find_by_id(pool, team_id, location_id).await?,
        None => None,
    };

    Ok(ShootDetail {
        location,
        participants: ParticipantRepo::list_for_shoot(pool, shoot.id).await?,
        equipment: EquipmentRepo::list_for_shoot(pool, shoot.id).await?,
        costumes: CostumeRepo::list_for_shoot(pool, shoot.id).await?,
        props: PropRepo::list_for_shoot(pool, shoot.id).await?,
        locations: LocationRepo::list_for_shoot(pool, shoot.id).await?,
        references: ReferenceRepo::list_for_shoot(pool, shoot.id).await?,
        shoot,
    })
}

async fn ensure_location(pool: &DbPool, team_id: DbId, location_id: DbId) -> AppResult<()> {
    LocationRepo::find_by_id(pool, team_id, location_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id: location_id,
        }))
}

/// Split position-ordered shoots into board columns. Shoots with an unknown
/// status are dropped; the database constraint makes that unreachable.
fn group_into_columns(shoots: Vec<Shoot>) -> Vec<BoardColumn> {
    let mut columns: Vec<BoardColumn> = BOARD_COLUMNS
        .iter()
        .map(|&status| BoardColumn {
            status,
            shoots: Vec::new(),
        })
        .collect();

    for shoot in shoots {
        if let Some(column) = columns.iter_mut().find(|c| c.status == shoot.status) {
            column.shoots.push(shoot);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn shoot(id: DbId, status: &str, position: i32) -> Shoot {
        Shoot {
            id,
            team_id: 1,
            title: format!("Shoot {id}"),
            description: None,
            status: status.to_string(),
            position,
            shoot_date: None,
            start_time: None,
            end_time: None,
            location_id: None,
            location_note: None,
            color: None,
            image_url: None,
            calendar_event_id: None,
            calendar_event_url: None,
            docs_url: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn board_keeps_every_column_in_order() {
        let columns = group_into_columns(vec![
            shoot(1, "planning", 0),
            shoot(2, "idea", 0),
            shoot(3, "planning", 1),
        ]);

        let statuses: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, BOARD_COLUMNS);

        let planning: Vec<_> = columns[1].shoots.iter().map(|s| s.id).collect();
        assert_eq!(planning, vec![1, 3]);
        assert_eq!(columns[0].shoots.len(), 1);
        assert!(columns[2].shoots.is_empty());
        assert!(columns[3].shoots.is_empty());
    }

    #[test]
    fn unknown_kind_is_bad_request() {
        assert!(matches!(parse_kind("wardrobe"), Err(AppError::BadRequest(_))));
        assert_eq!(parse_kind("costume").unwrap(), ResourceKind::Costumes);
    }
}
