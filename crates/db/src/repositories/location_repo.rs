//! Repository for the `locations` table.

use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location, UpdateLocation};
use crate::models::ResourceListParams;
use crate::repositories::like_pattern;
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, name, address, latitude, longitude, place_id, notes, \
                        image_url, created_at, updated_at";

/// Provides team-scoped CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (team_id, name, address, latitude, longitude, place_id,
                                    notes, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(team_id)
            .bind(input.name.trim())
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.place_id)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a location the team already saved for a provider place id.
    pub async fn find_by_place_id(
        pool: &PgPool,
        team_id: DbId,
        place_id: &str,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE team_id = $1 AND place_id = $2
             ORDER BY id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(team_id)
            .bind(place_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's locations; `q` matches name or address.
    pub async fn list(
        pool: &PgPool,
        team_id: DbId,
        params: &ResourceListParams,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE team_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2 OR address ILIKE $2)
             ORDER BY LOWER(name) ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Location>(&query)
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
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($3, name),
                address = COALESCE($4, address),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                place_id = COALESCE($7, place_id),
                notes = COALESCE($8, notes),
                image_url = COALESCE($9, image_url)
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(team_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.place_id)
            .bind(&input.notes)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Location rows attached to a shoot through `shoot_locations`.
    pub async fn list_for_shoot(pool: &PgPool, shoot_id: DbId) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE id IN (SELECT resource_id FROM shoot_locations WHERE shoot_id = $1)
             ORDER BY LOWER(name) ASC, id ASC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(shoot_id)
            .fetch_all(pool)
            .await
    }
}
