//! Repository for the `personnel` table.

use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::personnel::{CreatePersonnel, Personnel, UpdatePersonnel};
use crate::models::ResourceListParams;
use crate::repositories::like_pattern;
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, name, role, email, phone, instagram, notes, image_url, \
                        created_at, updated_at";

/// Provides team-scoped CRUD operations for personnel.
pub struct PersonnelRepo;

impl PersonnelRepo {
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        input: &CreatePersonnel,
    ) -> Result<Personnel, sqlx::Error> {
        let query = format!(
            "INSERT INTO personnel (team_id, name, role, email, phone, instagram, notes, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(team_id)
            .bind(input.name.trim())
            .bind(&input.role)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.instagram)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<Personnel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personnel WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's personnel alphabetically, optionally filtered by name.
    pub async fn list(
        pool: &PgPool,
        team_id: DbId,
        params: &ResourceListParams,
    ) -> Result<Vec<Personnel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personnel
             WHERE team_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)
             ORDER BY LOWER(name) ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Personnel>(&query)
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
        input: &UpdatePersonnel,
    ) -> Result<Option<Personnel>, sqlx::Error> {
        let query = format!(
            "UPDATE personnel SET
                name = COALESCE($3, name),
                role = COALESCE($4, role),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                instagram = COALESCE($7, instagram),
                notes = COALESCE($8, notes),
                image_url = COALESCE($9, image_url)
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .bind(team_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.role)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.instagram)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personnel WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
