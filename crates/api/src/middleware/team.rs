//! Active-team scoping.
//!
//! Every team-scoped handler takes a [`TeamContext`]. Resolution order:
//!
//! 1. the user's stored `active_team_id`, if they are still a member;
//! 2. otherwise their oldest membership, which is then stored;
//! 3. otherwise 403 `No active team`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shootboard_core::error::CoreError;
use shootboard_core::roles::can_manage_team;
use shootboard_core::types::DbId;
use shootboard_db::models::team::TeamMember;
use shootboard_db::repositories::{TeamMemberRepo, UserRepo};
use shootboard_db::DbPool;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The caller, their active team, and their role in it.
#[derive(Debug, Clone)]
pub struct TeamContext {
    pub user: AuthUser,
    pub team_id: DbId,
    pub role: String,
}

impl FromRequestParts<AppState> for TeamContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let membership = resolve_active_team(&state.pool, user.user_id).await?;
        Ok(TeamContext {
            user,
            team_id: membership.team_id,
            role: membership.role,
        })
    }
}

/// Requires owner or admin in the active team. Rejects with 403 otherwise.
pub struct RequireTeamAdmin(pub TeamContext);

impl FromRequestParts<AppState> for RequireTeamAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = TeamContext::from_request_parts(parts, state).await?;
        if !can_manage_team(&ctx.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Team owner or admin role required".into(),
            )));
        }
        Ok(RequireTeamAdmin(ctx))
    }
}

/// Resolve (and, on fallback, persist) the user's active team membership.
pub async fn resolve_active_team(pool: &DbPool, user_id: DbId) -> AppResult<TeamMember> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(team_id) = user.active_team_id {
        if let Some(member) = TeamMemberRepo::find(pool, team_id, user_id).await? {
            return Ok(member);
        }
    }

    let fallback = TeamMemberRepo::first_for_user(pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NoActiveTeam))?;

    UserRepo::set_active_team(pool, user_id, Some(fallback.team_id)).await?;
    tracing::info!(
        user_id,
        team_id = fallback.team_id,
        previous = ?user.active_team_id,
        "Active team fell back to oldest membership"
    );
    Ok(fallback)
}
