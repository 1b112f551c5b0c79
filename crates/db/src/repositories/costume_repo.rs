//! Repository for the `costumes` table.

use shootboard_core::resources::PROGRESS_PLANNED;
use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::costume::{Costume, CreateCostume, UpdateCostume};
use crate::models::ResourceListParams;
use crate::repositories::like_pattern;
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, character_name, series, status, estimated_cost, notes, \
                        image_url, created_at, updated_at";

/// Provides team-scoped CRUD operations for costumes.
pub struct CostumeRepo;

impl CostumeRepo {
    /// Insert a new costume. `status` defaults to `planned`.
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        input: &CreateCostume,
    ) -> Result<Costume, sqlx::Error> {
        let query = format!(
            "INSERT INTO costumes (team_id, character_name, series, status, estimated_cost,
                                   notes, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Costume>(&query)
            .bind(team_id)
            .bind(input.character_name.trim())
            .bind(&input.series)
            .bind(input.status.as_deref().unwrap_or(PROGRESS_PLANNED))
            .bind(input.estimated_cost)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<Costume>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM costumes WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, Costume>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's costumes; `q` matches character or series.
    pub async fn list(
        pool: &PgPool,
        team_id: DbId,
        params: &ResourceListParams,
    ) -> Result<Vec<Costume>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM costumes
             WHERE team_id = $1
               AND ($2::TEXT IS NULL OR character_name ILIKE $2 OR series ILIKE $2)
             ORDER BY LOWER(character_name) ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Costume>(&query)
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
        input: &UpdateCostume,
    ) -> Result<Option<Costume>, sqlx::Error> {
        let query = format!(
            "UPDATE costumes SET
                character_name = COALESCE($3, character_name),
                series = COALESCE($4, series),
                status = COALESCE($5, status),
                estimated_cost = COALESCE($6, estimated_cost),
                notes = COALESCE($7, notes),
                image_url = COALESCE($8, image_url)
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Costume>(&query)
            .bind(id)
            .bind(team_id)
            .bind(input.character_name.as_deref().map(str::trim))
            .bind(&input.series)
            .bind(&input.status)
            .bind(input.estimated_cost)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM costumes WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Costume rows attached to a shoot through `shoot_costumes`.
    pub async fn list_for_shoot(pool: &PgPool, shoot_id: DbId) -> Result<Vec<Costume>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM costumes
             WHERE id IN (SELECT resource_id FROM shoot_costumes WHERE shoot_id = $1)
             ORDER BY LOWER(character_name) ASC, id ASC"
        );
        sqlx::query_as::<_, Costume>(&query)
            .bind(shoot_id)
            .fetch_all(pool)
            .await
    }
}
