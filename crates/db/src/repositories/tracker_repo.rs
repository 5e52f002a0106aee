//! Repository for the `trackers` table.

use sqlx::PgPool;
use tabletop_core::types::ShapeId;
use uuid::Uuid;

use crate::models::tracker::{CreateTracker, Tracker, UpdateTracker};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "uuid, shape_uuid, visible, name, value, maxvalue";

/// Provides CRUD operations for shape trackers.
pub struct TrackerRepo;

impl TrackerRepo {
    /// Attach a new tracker to a shape, returning the created row.
    pub async fn create(
        pool: &PgPool,
        shape_uuid: ShapeId,
        input: &CreateTracker,
    ) -> Result<Tracker, sqlx::Error> {
        let query = format!(
            "INSERT INTO trackers (uuid, shape_uuid, visible, name, value, maxvalue) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tracker>(&query)
            .bind(input.uuid)
            .bind(shape_uuid)
            .bind(input.visible)
            .bind(&input.name)
            .bind(input.value)
            .bind(input.maxvalue)
            .fetch_one(pool)
            .await
    }

    /// Find a tracker by its uuid.
    pub async fn find_by_id(pool: &PgPool, uuid: Uuid) -> Result<Option<Tracker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trackers WHERE uuid = $1");
        sqlx::query_as::<_, Tracker>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// List a shape's trackers, optionally only the visible ones.
    ///
    /// Row order is whatever the database returns.
    pub async fn list_for_shape(
        pool: &PgPool,
        shape_uuid: ShapeId,
        visible_only: bool,
    ) -> Result<Vec<Tracker>, sqlx::Error> {
        let query = if visible_only {
            format!("SELECT {COLUMNS} FROM trackers WHERE shape_uuid = $1 AND visible = true")
        } else {
            format!("SELECT {COLUMNS} FROM trackers WHERE shape_uuid = $1")
        };
        sqlx::query_as::<_, Tracker>(&query)
            .bind(shape_uuid)
            .fetch_all(pool)
            .await
    }

    /// Update a tracker. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no tracker with the given uuid exists.
    pub async fn update(
        pool: &PgPool,
        uuid: Uuid,
        input: &UpdateTracker,
    ) -> Result<Option<Tracker>, sqlx::Error> {
        let query = format!(
            "UPDATE trackers SET \
                visible = COALESCE($2, visible), \
                name = COALESCE($3, name), \
                value = COALESCE($4, value), \
                maxvalue = COALESCE($5, maxvalue) \
             WHERE uuid = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tracker>(&query)
            .bind(uuid)
            .bind(input.visible)
            .bind(&input.name)
            .bind(input.value)
            .bind(input.maxvalue)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tracker. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, uuid: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trackers WHERE uuid = $1")
            .bind(uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
