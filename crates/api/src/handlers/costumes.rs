//! Handlers for `/costumes`.
//!
//! A costume tracks the character, series, and build progress.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::costume::{CreateCostume, Costume, UpdateCostume};
use shootboard_db::models::ResourceListParams;
use shootboard_db::repositories::CostumeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Costume",
        id,
    })
}

/// POST /api/costumes
pub async fn create(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreateCostume>,
) -> AppResult<(StatusCode, Json<DataResponse<Costume>>)> {
    let item = CostumeRepo::create(&state.pool, ctx.team_id, &input).await?;
    tracing::info!(team_id = ctx.team_id, costume_id = item.id, "Costume created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/costumes
///
/// `?q=` matches the character name or the series.
pub async fn list(
    State(state): State<AppState>,
    ctx: TeamContext,
    Query(params): Query<ResourceListParams>,
) -> AppResult<Json<DataResponse<Vec<Costume>>>> {
    let items = CostumeRepo::list(&state.pool, ctx.team_id, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/costumes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Costume>>> {
    let item = CostumeRepo::find_by_id(&state.pool, ctx.team_id, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/costumes/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateCostume>,
) -> AppResult<Json<DataResponse<Costume>>> {
    let item = CostumeRepo::update(&state.pool, ctx.team_id, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/costumes/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CostumeRepo::delete(&state.pool, ctx.team_id, id).await? {
        tracing::info!(team_id = ctx.team_id, costume_id = id, "Costume deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
