//! Repository for the `shoot_references` table.

use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::reference::{CreateReference, Reference, UpdateReference};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, shoot_id, url, caption, sort_order, created_at, updated_at";

/// Provides CRUD operations for a shoot's reference images.
///
/// Rows are addressed by `(shoot_id, id)`; the caller checks the shoot's team.
pub struct ReferenceRepo;

impl ReferenceRepo {
    /// Insert a reference, appended after existing ones unless `sort_order`
    /// is given.
    pub async fn create(
        pool: &PgPool,
        shoot_id: DbId,
        input: &CreateReference,
    ) -> Result<Reference, sqlx::Error> {
        let query = format!(
            "INSERT INTO shoot_references (shoot_id, url, caption, sort_order)
             VALUES ($1, $2, $3,
                     COALESCE($4, (SELECT COUNT(*)::INTEGER FROM shoot_references
                                   WHERE shoot_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reference>(&query)
            .bind(shoot_id)
            .bind(input.url.trim())
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_shoot(
        pool: &PgPool,
        shoot_id: DbId,
    ) -> Result<Vec<Reference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shoot_references
             WHERE shoot_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Reference>(&query)
            .bind(shoot_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        shoot_id: DbId,
        id: DbId,
        input: &UpdateReference,
    ) -> Result<Option<Reference>, sqlx::Error> {
        let query = format!(
            "UPDATE shoot_references SET
                url = COALESCE($3, url),
                caption = COALESCE($4, caption),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1 AND shoot_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reference>(&query)
            .bind(id)
            .bind(shoot_id)
            .bind(input.url.as_deref().map(str::trim))
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, shoot_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shoot_references WHERE id = $1 AND shoot_id = $2")
            .bind(id)
            .bind(shoot_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
