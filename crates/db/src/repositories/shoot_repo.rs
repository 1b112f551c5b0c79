//! Repository for the `shoots` table.
//!
//! Cards keep a dense zero-based `position` within their status column:
//! create appends, delete closes the gap, and [`ShootRepo::move_to`]
//! re-sequences both the source and destination columns in one transaction.
//!
//! Every position-changing write first takes `lock_board` on the team, so
//! concurrent writers to the same board run one after another.

use shootboard_core::shoot::clamp_position;
use shootboard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::shoot::{CreateShoot, Shoot, ShootListParams, UpdateShoot};
use crate::repositories::like_pattern;
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, title, description, status, position, shoot_date, \
                        start_time, end_time, location_id, location_note, color, image_url, \
                        calendar_event_id, calendar_event_url, docs_url, created_by, \
                        created_at, updated_at";

/// Provides CRUD and board operations for shoots.
pub struct ShootRepo;

impl ShootRepo {
    /// Insert a new shoot at the end of its status column.
    ///
    /// `status` is the already-resolved column (the DTO's value or the default).
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        created_by: DbId,
        status: &str,
        input: &CreateShoot,
    ) -> Result<Shoot, sqlx::Error> {
        let query = format!(
            "INSERT INTO shoots (team_id, created_by, status, position, title, description,
                                 shoot_date, start_time, end_time, location_id, location_note,
                                 color, image_url)
             VALUES ($1, $2, $3,
                     (SELECT COUNT(*)::INTEGER FROM shoots WHERE team_id = $1 AND status = $3),
                     $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        lock_board(&mut *tx, team_id).await?;

        let shoot = sqlx::query_as::<_, Shoot>(&query)
            .bind(team_id)
            .bind(created_by)
            .bind(status)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.shoot_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.location_id)
            .bind(&input.location_note)
            .bind(&input.color)
            .bind(&input.image_url)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(shoot)
    }

    /// Find a shoot by ID within a team.
    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<Shoot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shoots WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, Shoot>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's shoots, soonest dated first (undated last), then newest.
    pub async fn list(
        pool: &PgPool,
        team_id: DbId,
        params: &ShootListParams,
    ) -> Result<Vec<Shoot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shoots
             WHERE team_id = $1
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR title ILIKE $3)
             ORDER BY shoot_date ASC NULLS LAST, created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Shoot>(&query)
            .bind(team_id)
            .bind(&params.status)
            .bind(like_pattern(params.q.as_deref()))
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Every shoot in a team ordered by column position, for the board view.
    pub async fn list_for_board(pool: &PgPool, team_id: DbId) -> Result<Vec<Shoot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shoots WHERE team_id = $1 ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, Shoot>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Update a shoot's details. Only non-`None` fields are applied; `status`
    /// is ignored here (see [`ShootRepo::move_to`]).
    ///
    /// Returns `None` if no row with the given `id` exists in the team.
    pub async fn update(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
        input: &UpdateShoot,
    ) -> Result<Option<Shoot>, sqlx::Error> {
        let query = format!(
            "UPDATE shoots SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                shoot_date = COALESCE($5, shoot_date),
                start_time = COALESCE($6, start_time),
                end_time = COALESCE($7, end_time),
                location_id = COALESCE($8, location_id),
                location_note = COALESCE($9, location_note),
                color = COALESCE($10, color),
                image_url = COALESCE($11, image_url)
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shoot>(&query)
            .bind(id)
            .bind(team_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.shoot_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.location_id)
            .bind(&input.location_note)
            .bind(&input.color)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Move a card to `status` at `position` (appended when `None`).
    ///
    /// The source column closes its gap and the destination column opens
    /// one, so positions stay dense in both. Returns `None` if the shoot
    /// does not exist in the team.
    pub async fn move_to(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
        status: &str,
        position: Option<i32>,
    ) -> Result<Option<Shoot>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_board(&mut *tx, team_id).await?;

        let current: Option<(String, i32)> = sqlx::query_as(
            "SELECT status, position FROM shoots WHERE id = $1 AND team_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((old_status, old_position)) = current else {
            return Ok(None);
        };

        let others: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shoots WHERE team_id = $1 AND status = $2 AND id <> $3",
        )
        .bind(team_id)
        .bind(status)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        let others = i32::try_from(others).unwrap_or(i32::MAX);
        let target = clamp_position(position, others);

        sqlx::query(
            "UPDATE shoots SET position = position - 1
             WHERE team_id = $1 AND status = $2 AND position > $3 AND id <> $4",
        )
        .bind(team_id)
        .bind(&old_status)
        .bind(old_position)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE shoots SET position = position + 1
             WHERE team_id = $1 AND status = $2 AND position >= $3 AND id <> $4",
        )
        .bind(team_id)
        .bind(status)
        .bind(target)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE shoots SET status = $2, position = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let shoot = sqlx::query_as::<_, Shoot>(&query)
            .bind(id)
            .bind(status)
            .bind(target)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(shoot))
    }

    /// Delete a shoot and close the gap it leaves in its column.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_board(&mut *tx, team_id).await?;

        let removed: Option<(String, i32)> = sqlx::query_as(
            "DELETE FROM shoots WHERE id = $1 AND team_id = $2 RETURNING status, position",
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((status, position)) = removed else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE shoots SET position = position - 1
             WHERE team_id = $1 AND status = $2 AND position > $3",
        )
        .bind(team_id)
        .bind(&status)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Record the calendar event created for a shoot.
    pub async fn set_calendar_event(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
        event_id: &str,
        event_url: Option<&str>,
    ) -> Result<Option<Shoot>, sqlx::Error> {
        let query = format!(
            "UPDATE shoots SET calendar_event_id = $3, calendar_event_url = $4
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shoot>(&query)
            .bind(id)
            .bind(team_id)
            .bind(event_id)
            .bind(event_url)
            .fetch_optional(pool)
            .await
    }

    /// Record the planning document created for a shoot.
    pub async fn set_docs_url(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
        docs_url: &str,
    ) -> Result<Option<Shoot>, sqlx::Error> {
        let query = format!(
            "UPDATE shoots SET docs_url = $3
             WHERE id = $1 AND team_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shoot>(&query)
            .bind(id)
            .bind(team_id)
            .bind(docs_url)
            .fetch_optional(pool)
            .await
    }
}

/// Serialize board writers for one team until the transaction ends.
///
/// `FOR NO KEY UPDATE` on the team row; foreign-key checks from other
/// inserts only take key-share locks and are not blocked.
async fn lock_board(conn: &mut PgConnection, team_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT id FROM teams WHERE id = $1 FOR NO KEY UPDATE")
        .bind(team_id)
        .execute(conn)
        .await?;
    Ok(())
}
