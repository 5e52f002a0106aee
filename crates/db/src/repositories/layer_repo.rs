//! Repository for the `layers` table.

use sqlx::PgPool;
use tabletop_core::types::DbId;

use crate::models::layer::{CreateLayer, Layer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, location";

/// Provides the layer lookups shapes depend on.
pub struct LayerRepo;

impl LayerRepo {
    /// Insert a new layer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLayer) -> Result<Layer, sqlx::Error> {
        let query = format!(
            "INSERT INTO layers (name, location) VALUES ($1, COALESCE($2, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Layer>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find a layer by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Layer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM layers WHERE id = $1");
        sqlx::query_as::<_, Layer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a layer. Its shapes and their children go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM layers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
