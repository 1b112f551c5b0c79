//! Repository for the `equipment` table.

use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};
use crate::models::ResourceListParams;
use crate::repositories::like_pattern;
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, name, category, brand, model, quantity, notes, image_url, \
                        created_at, updated_at";

/// Provides team-scoped CRUD operations for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert a new equipment entry. `quantity` defaults to 1.
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        input: &CreateEquipment,
    ) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (team_id, name, category, brand, model, quantity, notes, image_url)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 1), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(team_id)
            .bind(input.name.trim())
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.quantity)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's equipment grouped by category, then name.
    pub async fn list(
        pool: &PgPool,
        team_id: DbId,
        params: &ResourceListParams,
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment
             WHERE team_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)
             ORDER BY category ASC NULLS LAST, LOWER(name) ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Equipment>(&query)
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
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                brand = COALESCE($5, brand),
                model = COALESCE($6, model),
                quantity = COALESCE($7, quantity),
                notes = COALESCE($8, notes),
                image_url = COALESCE($9, image_url)
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(team_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.quantity)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Equipment rows attached to a shoot through `shoot_equipment`.
    pub async fn list_for_shoot(pool: &PgPool, shoot_id: DbId) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment
             WHERE id IN (SELECT resource_id FROM shoot_equipment WHERE shoot_id = $1)
             ORDER BY category ASC NULLS LAST, LOWER(name) ASC, id ASC"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(shoot_id)
            .fetch_all(pool)
            .await
    }
}
