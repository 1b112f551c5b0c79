//! Handlers for `/personnel`: the team's roster of cosplayers, photographers,
//! and helpers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::personnel::{CreatePersonnel, Personnel, UpdatePersonnel};
use shootboard_db::models::ResourceListParams;
use shootboard_db::repositories::PersonnelRepo;

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Personnel",
        id,
    })
}

/// POST /api/personnel
pub async fn create(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreatePersonnel>,
) -> AppResult<(StatusCode, Json<DataResponse<Personnel>>)> {
    let person = PersonnelRepo::create(&state.pool, ctx.team_id, &input).await?;
    tracing::info!(team_id = ctx.team_id, personnel_id = person.id, "Personnel created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// GET /api/personnel
///
/// `?q=` matches the name.
pub async fn list(
    State(state): State<AppState>,
    ctx: TeamContext,
    Query(params): Query<ResourceListParams>,
) -> AppResult<Json<DataResponse<Vec<Personnel>>>> {
    let items = PersonnelRepo::list(&state.pool, ctx.team_id, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/personnel/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Personnel>>> {
    let person = PersonnelRepo::find_by_id(&state.pool, ctx.team_id, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: person }))
}

/// PATCH /api/personnel/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdatePersonnel>,
) -> AppResult<Json<DataResponse<Personnel>>> {
    let person = PersonnelRepo::update(&state.pool, ctx.team_id, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/personnel/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PersonnelRepo::delete(&state.pool, ctx.team_id, id).await? {
        tracing::info!(team_id = ctx.team_id, personnel_id = id, "Personnel deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
