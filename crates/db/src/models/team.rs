//! Team (tenant) and membership models.

use serde::{Deserialize, Serialize};
use shootboard_core::types::{DbId, Timestamp};
use shootboard_core::validation::{validate_not_blank, validate_team_role};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A team as seen by one of its members: the team row plus the caller's role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberTeam {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub role: String,
    pub joined_at: Timestamp,
}

/// A row from the `team_members` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub team_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A membership joined with the member's public profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMemberDetail {
    pub user_id: DbId,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub joined_at: Timestamp,
}

/// A team with its member roster, returned by `GET /team`.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    /// The caller's own role in this team.
    pub role: String,
    pub members: Vec<TeamMemberDetail>,
}

/// DTO for creating a team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeam {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// DTO for updating a team. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeam {
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// DTO for adding an existing user to a team by email.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTeamMember {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Defaults to `member` when omitted.
    #[validate(custom(function = "validate_team_role"))]
    pub role: Option<String>,
}

/// DTO for changing a member's role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeamMember {
    #[validate(custom(function = "validate_team_role"))]
    pub role: String,
}

/// DTO for `PUT /user/active-team`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetActiveTeam {
    pub team_id: DbId,
}
