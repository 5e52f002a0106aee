//! Repository for the `auras` table.

use sqlx::PgPool;
use tabletop_core::types::ShapeId;
use uuid::Uuid;

use crate::models::aura::{Aura, CreateAura, UpdateAura};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "uuid, shape_uuid, vision_source, visible, name, value, dim, colour";

/// Provides CRUD operations for shape auras.
pub struct AuraRepo;

impl AuraRepo {
    /// Attach a new aura to a shape, returning the created row.
    pub async fn create(
        pool: &PgPool,
        shape_uuid: ShapeId,
        input: &CreateAura,
    ) -> Result<Aura, sqlx::Error> {
        let query = format!(
            "INSERT INTO auras (uuid, shape_uuid, vision_source, visible, name, value, dim, colour) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Aura>(&query)
            .bind(input.uuid)
            .bind(shape_uuid)
            .bind(input.vision_source)
            .bind(input.visible)
            .bind(&input.name)
            .bind(input.value)
            .bind(input.dim)
            .bind(&input.colour)
            .fetch_one(pool)
            .await
    }

    /// Find an aura by its uuid.
    pub async fn find_by_id(pool: &PgPool, uuid: Uuid) -> Result<Option<Aura>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auras WHERE uuid = $1");
        sqlx::query_as::<_, Aura>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// List a shape's auras, optionally only the visible ones.
    pub async fn list_for_shape(
        pool: &PgPool,
        shape_uuid: ShapeId,
        visible_only: bool,
    ) -> Result<Vec<Aura>, sqlx::Error> {
        let query = if visible_only {
            format!("SELECT {COLUMNS} FROM auras WHERE shape_uuid = $1 AND visible = true")
        } else {
            format!("SELECT {COLUMNS} FROM auras WHERE shape_uuid = $1")
        };
        sqlx::query_as::<_, Aura>(&query)
            .bind(shape_uuid)
            .fetch_all(pool)
            .await
    }

    /// Update an aura. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no aura with the given uuid exists.
    pub async fn update(
        pool: &PgPool,
        uuid: Uuid,
        input: &UpdateAura,
    ) -> Result<Option<Aura>, sqlx::Error> {
        let query = format!(
            "UPDATE auras SET \
                vision_source = COALESCE($2, vision_source), \
                visible = COALESCE($3, visible), \
                name = COALESCE($4, name), \
                value = COALESCE($5, value), \
                dim = COALESCE($6, dim), \
                colour = COALESCE($7, colour) \
             WHERE uuid = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Aura>(&query)
            .bind(uuid)
            .bind(input.vision_source)
            .bind(input.visible)
            .bind(&input.name)
            .bind(input.value)
            .bind(input.dim)
            .bind(&input.colour)
            .fetch_optional(pool)
            .await
    }

    /// Delete an aura. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, uuid: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auras WHERE uuid = $1")
            .bind(uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
