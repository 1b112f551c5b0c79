//! Repository for the `shoot_participants` table.

use shootboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::participant::{NewParticipant, Participant, UpdateParticipant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, shoot_id, personnel_id, name, role, character_name, notes, \
                        created_at, updated_at";

/// Provides CRUD operations for shoot participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a participant. A second row for the same personnel entry
    /// violates `uq_shoot_participants_personnel`.
    pub async fn create(
        pool: &PgPool,
        shoot_id: DbId,
        input: &NewParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO shoot_participants (shoot_id, personnel_id, name, role,
                                             character_name, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(shoot_id)
            .bind(input.personnel_id)
            .bind(input.name.trim())
            .bind(&input.role)
            .bind(&input.character_name)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_shoot(
        pool: &PgPool,
        shoot_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shoot_participants
             WHERE shoot_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(shoot_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        shoot_id: DbId,
        id: DbId,
        input: &UpdateParticipant,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE shoot_participants SET
                name = COALESCE($3, name),
                role = COALESCE($4, role),
                character_name = COALESCE($5, character_name),
                notes = COALESCE($6, notes)
             WHERE id = $1 AND shoot_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(shoot_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.role)
            .bind(&input.character_name)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, shoot_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM shoot_participants WHERE id = $1 AND shoot_id = $2")
                .bind(id)
                .bind(shoot_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
