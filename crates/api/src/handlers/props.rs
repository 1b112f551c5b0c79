//! Handlers for `/props`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::prop::{CreateProp, Prop, UpdateProp};
use shootboard_db::models::ResourceListParams;
use shootboard_db::repositories::PropRepo;

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Prop",
        id,
    })
}

/// POST /api/props
pub async fn create(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreateProp>,
) -> AppResult<(StatusCode, Json<DataResponse<Prop>>)> {
    let item = PropRepo::create(&state.pool, ctx.team_id, &input).await?;
    tracing::info!(team_id = ctx.team_id, prop_id = item.id, "Prop created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/props
pub async fn list(
    State(state): State<AppState>,
    ctx: TeamContext,
    Query(params): Query<ResourceListParams>,
) -> AppResult<Json<DataResponse<Vec<Prop>>>> {
    let items = PropRepo::list(&state.pool, ctx.team_id, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/props/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Prop>>> {
    let item = PropRepo::find_by_id(&state.pool, ctx.team_id, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/props/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateProp>,
) -> AppResult<Json<DataResponse<Prop>>> {
    let item = PropRepo::update(&state.pool, ctx.team_id, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/props/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PropRepo::delete(&state.pool, ctx.team_id, id).await? {
        tracing::info!(team_id = ctx.team_id, prop_id = id, "Prop deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
