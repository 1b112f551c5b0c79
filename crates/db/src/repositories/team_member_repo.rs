//! Repository for the `team_members` table.

use shootboard_core::roles::{would_orphan_team, ROLE_OWNER};
use shootboard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::team::{TeamMember, TeamMemberDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, user_id, role, created_at, updated_at";

/// Result of a role change or removal that must leave the team an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberChange<T> {
    Applied(T),
    /// The user is not a member of the team.
    NotFound,
    /// The change would remove the team's last owner; nothing was written.
    LastOwner,
}

/// Provides membership lookups and mutations.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// Find the membership of `user_id` in `team_id`, if any.
    pub async fn find(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM team_members WHERE team_id = $1 AND user_id = $2");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The user's oldest membership. Used as the active-team fallback.
    pub async fn first_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's members with their profiles, owners first.
    pub async fn list_for_team(
        pool: &PgPool,
        team_id: DbId,
    ) -> Result<Vec<TeamMemberDetail>, sqlx::Error> {
        sqlx::query_as::<_, TeamMemberDetail>(
            "SELECT u.id AS user_id, u.email, u.display_name, u.avatar_url,
                    tm.role, tm.created_at AS joined_at
             FROM team_members tm
             JOIN users u ON u.id = tm.user_id
             WHERE tm.team_id = $1
             ORDER BY CASE tm.role WHEN 'owner' THEN 0 WHEN 'admin' THEN 1 ELSE 2 END,
                      tm.created_at ASC",
        )
        .bind(team_id)
        .fetch_all(pool)
        .await
    }

    /// Add a member. A duplicate membership violates `uq_team_members_team_user`.
    pub async fn add(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (team_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Change a member's role, refusing to demote the last owner.
    ///
    /// The owner check and the write happen under row locks on the team's
    /// owners, so two owners demoting each other cannot both succeed.
    pub async fn update_role(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<MemberChange<TeamMember>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owners = lock_owners(&mut *tx, team_id).await?;
        let Some(current) = locked_role(&mut *tx, team_id, user_id).await? else {
            return Ok(MemberChange::NotFound);
        };
        if role != ROLE_OWNER && would_orphan_team(&current, owners) {
            return Ok(MemberChange::LastOwner);
        }

        let query = format!(
            "UPDATE team_members SET role = $3
             WHERE team_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let member = sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(MemberChange::Applied(member))
    }

    /// Remove a member unless they are the last owner. Clears the user's
    /// active team if it pointed here.
    pub async fn remove(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
    ) -> Result<MemberChange<()>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owners = lock_owners(&mut *tx, team_id).await?;
        let Some(current) = locked_role(&mut *tx, team_id, user_id).await? else {
            return Ok(MemberChange::NotFound);
        };
        if would_orphan_team(&current, owners) {
            return Ok(MemberChange::LastOwner);
        }

        sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE users SET active_team_id = NULL WHERE id = $1 AND active_team_id = $2",
        )
        .bind(user_id)
        .bind(team_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(MemberChange::Applied(()))
    }

    /// Number of owners the team currently has.
    pub async fn count_owners(pool: &PgPool, team_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND role = $2")
            .bind(team_id)
            .bind(ROLE_OWNER)
            .fetch_one(pool)
            .await
    }
}

/// Lock the team's owner rows (in id order) and return how many there are.
///
/// A concurrent writer blocks here until this transaction ends and then
/// sees the owners as they are after it.
async fn lock_owners(conn: &mut PgConnection, team_id: DbId) -> Result<i64, sqlx::Error> {
    let owners: Vec<DbId> = sqlx::query_scalar(
        "SELECT id FROM team_members WHERE team_id = $1 AND role = $2 ORDER BY id FOR UPDATE",
    )
    .bind(team_id)
    .bind(ROLE_OWNER)
    .fetch_all(conn)
    .await?;
    Ok(i64::try_from(owners.len()).unwrap_or(i64::MAX))
}

/// The member's current role, locking their row.
async fn locked_role(
    conn: &mut PgConnection,
    team_id: DbId,
    user_id: DbId,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT role FROM team_members WHERE team_id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(team_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
}
