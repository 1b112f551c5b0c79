//! Associations between shoots and team resources.
//!
//! Equipment, costumes, props, and locations live in `shoot_<kind>` join
//! tables. Personnel are attached as rows in `shoot_participants` so they
//! can carry a role and character; detaching personnel only removes those
//! linked rows, never ad-hoc participants.
//!
//! Callers are expected to have checked that the shoot belongs to the team.
//! Every method here checks that the *resource* does too.

use shootboard_core::resources::ResourceKind;
use shootboard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// Provides attach/detach/replace operations for shoot resources.
pub struct ShootResourceRepo;

/// Resource table for a kind.
fn resource_table(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Personnel => "personnel",
        ResourceKind::Equipment => "equipment",
        ResourceKind::Costumes => "costumes",
        ResourceKind::Props => "props",
        ResourceKind::Locations => "locations",
    }
}

/// Join table for the non-personnel kinds.
fn join_table(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Personnel => None,
        ResourceKind::Equipment => Some("shoot_equipment"),
        ResourceKind::Costumes => Some("shoot_costumes"),
        ResourceKind::Props => Some("shoot_props"),
        ResourceKind::Locations => Some("shoot_locations"),
    }
}

impl ShootResourceRepo {
    /// IDs of the resources of `kind` attached to a shoot, ascending.
    pub async fn list_ids(
        pool: &PgPool,
        shoot_id: DbId,
        kind: ResourceKind,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = match join_table(kind) {
            Some(join) => format!(
                "SELECT resource_id FROM {join} WHERE shoot_id = $1 ORDER BY resource_id ASC"
            ),
            None => "SELECT personnel_id FROM shoot_participants
                     WHERE shoot_id = $1 AND personnel_id IS NOT NULL
                     ORDER BY personnel_id ASC"
                .to_string(),
        };
        sqlx::query_scalar(&query).bind(shoot_id).fetch_all(pool).await
    }

    /// Attach one resource. Attaching twice is a no-op.
    ///
    /// Returns `false` if the resource does not exist in the team.
    pub async fn attach(
        pool: &PgPool,
        team_id: DbId,
        shoot_id: DbId,
        kind: ResourceKind,
        resource_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let ids = [resource_id];
        if Self::first_foreign(&mut *conn, team_id, kind, &ids).await?.is_some() {
            return Ok(false);
        }
        Self::insert_links(&mut *conn, shoot_id, kind, &ids).await?;
        Ok(true)
    }

    /// Detach one resource. Returns `true` if an association was removed.
    pub async fn detach(
        pool: &PgPool,
        shoot_id: DbId,
        kind: ResourceKind,
        resource_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = match join_table(kind) {
            Some(join) => format!("DELETE FROM {join} WHERE shoot_id = $1 AND resource_id = $2"),
            None => "DELETE FROM shoot_participants WHERE shoot_id = $1 AND personnel_id = $2"
                .to_string(),
        };
        let result = sqlx::query(&query)
            .bind(shoot_id)
            .bind(resource_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the shoot's associations of `kind` with exactly `ids`.
    ///
    /// Runs on the caller's connection so several kinds can be replaced in
    /// one transaction. If any id is not a resource of the team, nothing
    /// changes and the smallest such id is returned.
    pub async fn replace(
        conn: &mut PgConnection,
        team_id: DbId,
        shoot_id: DbId,
        kind: ResourceKind,
        ids: &[DbId],
    ) -> Result<Option<DbId>, sqlx::Error> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        if let Some(foreign) = Self::first_foreign(conn, team_id, kind, &ids).await? {
            return Ok(Some(foreign));
        }

        let query = match join_table(kind) {
            Some(join) => format!(
                "DELETE FROM {join} WHERE shoot_id = $1 AND resource_id <> ALL($2::BIGINT[])"
            ),
            None => "DELETE FROM shoot_participants
                     WHERE shoot_id = $1 AND personnel_id IS NOT NULL
                       AND personnel_id <> ALL($2::BIGINT[])"
                .to_string(),
        };
        sqlx::query(&query)
            .bind(shoot_id)
            .bind(&ids)
            .execute(&mut *conn)
            .await?;

        Self::insert_links(conn, shoot_id, kind, &ids).await?;
        Ok(None)
    }

    /// Replace several kinds at once in a single transaction.
    ///
    /// On the first foreign id the transaction is rolled back and the kind
    /// and id are returned; nothing changes.
    pub async fn replace_many(
        pool: &PgPool,
        team_id: DbId,
        shoot_id: DbId,
        sets: &[(ResourceKind, &[DbId])],
    ) -> Result<Option<(ResourceKind, DbId)>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for &(kind, ids) in sets {
            if let Some(foreign) = Self::replace(&mut *tx, team_id, shoot_id, kind, ids).await? {
                tx.rollback().await?;
                return Ok(Some((kind, foreign)));
            }
        }
        tx.commit().await?;
        Ok(None)
    }

    /// Smallest id in `ids` that is not a resource of `kind` in the team.
    async fn first_foreign(
        conn: &mut PgConnection,
        team_id: DbId,
        kind: ResourceKind,
        ids: &[DbId],
    ) -> Result<Option<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(None);
        }
        let query = format!(
            "SELECT t.id FROM UNNEST($2::BIGINT[]) AS t(id)
             WHERE NOT EXISTS (SELECT 1 FROM {} r WHERE r.id = t.id AND r.team_id = $1)
             ORDER BY t.id ASC
             LIMIT 1",
            resource_table(kind)
        );
        sqlx::query_scalar(&query)
            .bind(team_id)
            .bind(ids)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert associations for `ids`, skipping ones that already exist. The
    /// ids must already be known to belong to the team.
    async fn insert_links(
        conn: &mut PgConnection,
        shoot_id: DbId,
        kind: ResourceKind,
        ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if ids.is_empty() {
            return Ok(());
        }

        let query = match join_table(kind) {
            Some(join) => format!(
                "INSERT INTO {join} (shoot_id, resource_id)
                 SELECT $1, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING"
            ),
            None => "INSERT INTO shoot_participants (shoot_id, personnel_id, name, role)
                     SELECT $1, p.id, p.name, p.role FROM personnel p
                     WHERE p.id = ANY($2::BIGINT[])
                     ON CONFLICT (shoot_id, personnel_id) WHERE personnel_id IS NOT NULL
                     DO NOTHING"
                .to_string(),
        };
        sqlx::query(&query)
            .bind(shoot_id)
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
