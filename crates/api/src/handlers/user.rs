//! Handlers for `/user`: the caller's profile, password, and active team.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shootboard_core::error::CoreError;
use shootboard_db::models::team::{SetActiveTeam, Team};
use shootboard_db::models::user::{UpdateProfile, UserResponse};
use shootboard_db::repositories::{SessionRepo, TeamMemberRepo, TeamRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::team::resolve_active_team;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /user/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

/// The caller's active team and their role in it.
#[derive(Debug, Serialize)]
pub struct ActiveTeam {
    #[serde(flatten)]
    pub team: Team,
    pub role: String,
}

fn user_gone() -> AppError {
    AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
}

/// GET /api/user
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(user_gone)?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PATCH /api/user
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    NormalizedJson(input): NormalizedJson<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if input
        .display_name
        .as_deref()
        .is_some_and(|n| n.trim().is_empty())
    {
        return Err(AppError::field("display_name", "must not be blank"));
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(user_gone)?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// POST /api/user/password
///
/// Requires the current password. Every session is revoked afterwards, so
/// other devices must sign in again. 204.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    NormalizedJson(input): NormalizedJson<ChangePassword>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(user_gone)?;

    let matches = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(AppError::field("current_password", "is incorrect"));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::field("new_password", msg))?;

    let hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hash).await?;
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, revoked, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/user/active-team
///
/// Resolves the active team, storing the fallback if the previous one is
/// gone. 403 when the user has no teams at all.
pub async fn get_active_team(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ActiveTeam>>> {
    let membership = resolve_active_team(&state.pool, auth.user_id).await?;
    let team = TeamRepo::find_by_id(&state.pool, membership.team_id)
        .await?
        .ok_or(AppError::Core(CoreError::NoActiveTeam))?;
    Ok(Json(DataResponse {
        data: ActiveTeam {
            team,
            role: membership.role,
        },
    }))
}

/// PUT /api/user/active-team
///
/// The caller must be a member of the target team (403 otherwise).
pub async fn set_active_team(
    State(state): State<AppState>,
    auth: AuthUser,
    NormalizedJson(input): NormalizedJson<SetActiveTeam>,
) -> AppResult<Json<DataResponse<ActiveTeam>>> {
    let membership = TeamMemberRepo::find(&state.pool, input.team_id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "You are not a member of this team".into(),
            ))
        })?;

    let team = TeamRepo::find_by_id(&state.pool, input.team_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Team",
            id: input.team_id,
        }))?;

    UserRepo::set_active_team(&state.pool, auth.user_id, Some(team.id)).await?;
    tracing::info!(user_id = auth.user_id, team_id = team.id, "Active team changed");

    Ok(Json(DataResponse {
        data: ActiveTeam {
            team,
            role: membership.role,
        },
    }))
}
