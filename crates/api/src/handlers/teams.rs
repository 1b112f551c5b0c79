//! Handlers for `/teams` and `/team`.
//!
//! Routes under `/teams/{id}` act on that team regardless of the caller's
//! active team, but only for members: a team the caller does not belong to
//! is reported as 404, the same as a team that does not exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::roles::{can_change_role, can_manage_team, ROLE_MEMBER, ROLE_OWNER};
use shootboard_core::types::DbId;
use shootboard_db::models::team::{
    AddTeamMember, CreateTeam, MemberTeam, Team, TeamMember, TeamMemberDetail, TeamWithMembers,
    UpdateTeam, UpdateTeamMember,
};
use shootboard_db::repositories::{MemberChange, TeamMemberRepo, TeamRepo, UserRepo};
use shootboard_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::team::{RequireTeamAdmin, TeamContext};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/teams
///
/// Every team the caller belongs to, with their role, oldest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<MemberTeam>>>> {
    let teams = TeamRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// POST /api/teams
///
/// The caller becomes the owner and the new team becomes their active team.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    NormalizedJson(input): NormalizedJson<CreateTeam>,
) -> AppResult<(StatusCode, Json<DataResponse<Team>>)> {
    let team = TeamRepo::create_with_owner(&state.pool, &input, auth.user_id).await?;
    tracing::info!(team_id = team.id, user_id = auth.user_id, "Team created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

/// GET /api/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TeamWithMembers>>> {
    let membership = require_member(&state.pool, id, auth.user_id).await?;
    let detail = team_with_members(&state.pool, id, membership.role).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/team
///
/// The caller's active team with its roster.
pub async fn active(
    State(state): State<AppState>,
    ctx: TeamContext,
) -> AppResult<Json<DataResponse<TeamWithMembers>>> {
    let detail = team_with_members(&state.pool, ctx.team_id, ctx.role).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/team
///
/// Rename or re-describe the active team. Owner or admin.
pub async fn update_active(
    State(state): State<AppState>,
    RequireTeamAdmin(ctx): RequireTeamAdmin,
    NormalizedJson(input): NormalizedJson<UpdateTeam>,
) -> AppResult<Json<DataResponse<Team>>> {
    let team = TeamRepo::update(&state.pool, ctx.team_id, &input)
        .await?
        .ok_or(team_not_found(ctx.team_id))?;
    tracing::info!(team_id = ctx.team_id, user_id = ctx.user.user_id, "Active team updated");
    Ok(Json(DataResponse { data: team }))
}

/// PATCH /api/teams/{id}
///
/// Owner or admin.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateTeam>,
) -> AppResult<Json<DataResponse<Team>>> {
    let membership = require_member(&state.pool, id, auth.user_id).await?;
    if !can_manage_team(&membership.role) {
        return Err(forbidden("Team owner or admin role required"));
    }

    let team = TeamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(team_not_found(id))?;
    tracing::info!(team_id = id, user_id = auth.user_id, "Team updated");
    Ok(Json(DataResponse { data: team }))
}

/// DELETE /api/teams/{id}
///
/// Owner only. Deletes every shoot and resource in the team.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let membership = require_member(&state.pool, id, auth.user_id).await?;
    if membership.role != ROLE_OWNER {
        return Err(forbidden("Only a team owner can delete the team"));
    }

    if TeamRepo::delete(&state.pool, id).await? {
        tracing::info!(team_id = id, user_id = auth.user_id, "Team deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(team_not_found(id))
    }
}

/// GET /api/teams/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TeamMemberDetail>>>> {
    require_member(&state.pool, id, auth.user_id).await?;
    let members = TeamMemberRepo::list_for_team(&state.pool, id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/teams/{id}/members
///
/// Add an existing account by email. Owner or admin; only an owner may add
/// another owner.
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<AddTeamMember>,
) -> AppResult<(StatusCode, Json<DataResponse<TeamMember>>)> {
    let actor = require_member(&state.pool, id, auth.user_id).await?;
    let role = input.role.as_deref().unwrap_or(ROLE_MEMBER);
    if !can_change_role(&actor.role, ROLE_MEMBER, role) {
        return Err(forbidden("You cannot grant this role"));
    }

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::field("email", "no account uses this email"))?;

    let member = TeamMemberRepo::add(&state.pool, id, user.id, role).await?;
    tracing::info!(team_id = id, user_id = user.id, role, "Team member added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PATCH /api/teams/{id}/members/{user_id}
///
/// Change a member's role. The last owner cannot be demoted (409).
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(DbId, DbId)>,
    NormalizedJson(input): NormalizedJson<UpdateTeamMember>,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let actor = require_member(&state.pool, id, auth.user_id).await?;
    let target = find_member(&state.pool, id, user_id).await?;

    if !can_change_role(&actor.role, &target.role, &input.role) {
        return Err(forbidden("You cannot change this member's role"));
    }

    let member = match TeamMemberRepo::update_role(&state.pool, id, user_id, &input.role).await? {
        MemberChange::Applied(member) => member,
        MemberChange::NotFound => return Err(member_not_found(user_id)),
        MemberChange::LastOwner => return Err(last_owner()),
    };
    tracing::info!(team_id = id, user_id, role = %member.role, "Team member role changed");
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/teams/{id}/members/{user_id}
///
/// Owner or admin removes a member; any member may remove themselves
/// (leave). Only an owner may remove an owner, and never the last one.
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let actor = require_member(&state.pool, id, auth.user_id).await?;
    let target = find_member(&state.pool, id, user_id).await?;

    let leaving = user_id == auth.user_id;
    if !leaving {
        if !can_manage_team(&actor.role) {
            return Err(forbidden("Team owner or admin role required"));
        }
        if target.role == ROLE_OWNER && actor.role != ROLE_OWNER {
            return Err(forbidden("Only an owner can remove another owner"));
        }
    }

    match TeamMemberRepo::remove(&state.pool, id, user_id).await? {
        MemberChange::Applied(()) => {}
        MemberChange::NotFound => return Err(member_not_found(user_id)),
        MemberChange::LastOwner => return Err(last_owner()),
    }
    tracing::info!(team_id = id, user_id, leaving, "Team member removed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's membership in `team_id`, or 404 for the team.
async fn require_member(pool: &DbPool, team_id: DbId, user_id: DbId) -> AppResult<TeamMember> {
    TeamMemberRepo::find(pool, team_id, user_id)
        .await?
        .ok_or(team_not_found(team_id))
}

fn last_owner() -> AppError {
    AppError::Core(CoreError::Conflict(
        "A team must keep at least one owner".into(),
    ))
}

async fn find_member(pool: &DbPool, team_id: DbId, user_id: DbId) -> AppResult<TeamMember> {
    TeamMemberRepo::find(pool, team_id, user_id)
        .await?
        .ok_or(member_not_found(user_id))
}

async fn team_with_members(
    pool: &DbPool,
    team_id: DbId,
    role: String,
) -> AppResult<TeamWithMembers> {
    let team = TeamRepo::find_by_id(pool, team_id)
        .await?
        .ok_or(team_not_found(team_id))?;
    let members = TeamMemberRepo::list_for_team(pool, team_id).await?;
    Ok(TeamWithMembers {
        team,
        role,
        members,
    })
}

fn team_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Team", id })
}

fn member_not_found(user_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Team member",
        id: user_id,
    })
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.to_string()))
}
