//! Repository for the `props` table.

use shootboard_core::resources::PROGRESS_PLANNED;
use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::prop::{CreateProp, Prop, UpdateProp};
use crate::models::ResourceListParams;
use crate::repositories::like_pattern;
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, name, status, notes, image_url, created_at, updated_at";

/// Provides team-scoped CRUD operations for props.
pub struct PropRepo;

impl PropRepo {
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        input: &CreateProp,
    ) -> Result<Prop, sqlx::Error> {
        let query = format!(
            "INSERT INTO props (team_id, name, status, notes, image_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prop>(&query)
            .bind(team_id)
            .bind(input.name.trim())
            .bind(input.status.as_deref().unwrap_or(PROGRESS_PLANNED))
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<Prop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM props WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, Prop>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        team_id: DbId,
        params: &ResourceListParams,
    ) -> Result<Vec<Prop>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM props
             WHERE team_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)
             ORDER BY LOWER(name) ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Prop>(&query)
            .bind(team_id)
            .bind(like_pattern(params.q.as_deref()))
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
        input: &UpdateProp,
    ) -> Result<Option<Prop>, sqlx::Error> {
        let query = format!(
            "UPDATE props SET
                name = COALESCE($3, name),
                status = COALESCE($4, status),
                notes = COALESCE($5, notes),
                image_url = COALESCE($6, image_url)
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prop>(&query)
            .bind(id)
            .bind(team_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.status)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM props WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Prop rows attached to a shoot through `shoot_props`.
    pub async fn list_for_shoot(pool: &PgPool, shoot_id: DbId) -> Result<Vec<Prop>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM props
             WHERE id IN (SELECT resource_id FROM shoot_props WHERE shoot_id = $1)
             ORDER BY LOWER(name) ASC, id ASC"
        );
        sqlx::query_as::<_, Prop>(&query)
            .bind(shoot_id)
            .fetch_all(pool)
            .await
    }
}
