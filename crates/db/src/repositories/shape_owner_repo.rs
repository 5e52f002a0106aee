//! Repository for the `shape_owners` join table.

use sqlx::PgPool;
use tabletop_core::types::{DbId, ShapeId};

use crate::models::shape_owner::ShapeOwner;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, shape_uuid, user_id";

/// Provides ownership grants between users and shapes.
pub struct ShapeOwnerRepo;

impl ShapeOwnerRepo {
    /// Grant `user_id` ownership of a shape.
    ///
    /// Idempotent: returns `None` when the user already owns the shape.
    pub async fn add(
        pool: &PgPool,
        shape_uuid: ShapeId,
        user_id: DbId,
    ) -> Result<Option<ShapeOwner>, sqlx::Error> {
        let query = format!(
            "INSERT INTO shape_owners (shape_uuid, user_id) VALUES ($1, $2) \
             ON CONFLICT (shape_uuid, user_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShapeOwner>(&query)
            .bind(shape_uuid)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Revoke ownership. Returns `true` if a grant was removed.
    pub async fn remove(
        pool: &PgPool,
        shape_uuid: ShapeId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shape_owners WHERE shape_uuid = $1 AND user_id = $2")
            .bind(shape_uuid)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All ownership rows of a shape.
    pub async fn list_for_shape(
        pool: &PgPool,
        shape_uuid: ShapeId,
    ) -> Result<Vec<ShapeOwner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shape_owners WHERE shape_uuid = $1");
        sqlx::query_as::<_, ShapeOwner>(&query)
            .bind(shape_uuid)
            .fetch_all(pool)
            .await
    }

    /// Names of the users owning a shape, in query order.
    pub async fn list_owner_names(
        pool: &PgPool,
        shape_uuid: ShapeId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT u.name FROM shape_owners so \
             JOIN users u ON u.id = so.user_id \
             WHERE so.shape_uuid = $1",
        )
        .bind(shape_uuid)
        .fetch_all(pool)
        .await
    }
}
