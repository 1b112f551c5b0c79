//! Handlers for `/equipment`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};
use shootboard_db::models::ResourceListParams;
use shootboard_db::repositories::EquipmentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Equipment",
        id,
    })
}

/// POST /api/equipment
pub async fn create(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<DataResponse<Equipment>>)> {
    let item = EquipmentRepo::create(&state.pool, ctx.team_id, &input).await?;
    tracing::info!(team_id = ctx.team_id, equipment_id = item.id, "Equipment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/equipment
pub async fn list(
    State(state): State<AppState>,
    ctx: TeamContext,
    Query(params): Query<ResourceListParams>,
) -> AppResult<Json<DataResponse<Vec<Equipment>>>> {
    let items = EquipmentRepo::list(&state.pool, ctx.team_id, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/equipment/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Equipment>>> {
    let item = EquipmentRepo::find_by_id(&state.pool, ctx.team_id, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/equipment/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateEquipment>,
) -> AppResult<Json<DataResponse<Equipment>>> {
    let item = EquipmentRepo::update(&state.pool, ctx.team_id, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/equipment/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EquipmentRepo::delete(&state.pool, ctx.team_id, id).await? {
        tracing::info!(team_id = ctx.team_id, equipment_id = id, "Equipment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
