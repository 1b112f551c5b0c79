//! Repository for the `teams` table.

use shootboard_core::roles::ROLE_OWNER;
use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::team::{CreateTeam, MemberTeam, Team, UpdateTeam};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_by, created_at, updated_at";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Create a team, make `user_id` its owner, and switch the user's active
    /// team to it, all in one transaction.
    pub async fn create_with_owner(
        pool: &PgPool,
        input: &CreateTeam,
        user_id: DbId,
    ) -> Result<Team, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO teams (name, description, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO team_members (team_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(team.id)
            .bind(user_id)
            .bind(ROLE_OWNER)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET active_team_id = $2 WHERE id = $1")
            .bind(user_id)
            .bind(team.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(team)
    }

    /// Find a team by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the teams `user_id` belongs to, oldest membership first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MemberTeam>, sqlx::Error> {
        sqlx::query_as::<_, MemberTeam>(
            "SELECT t.id, t.name, t.description, tm.role, tm.created_at AS joined_at
             FROM teams t
             JOIN team_members tm ON tm.team_id = t.id
             WHERE tm.user_id = $1
             ORDER BY tm.created_at ASC, tm.id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update a team. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team and, via cascades, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
