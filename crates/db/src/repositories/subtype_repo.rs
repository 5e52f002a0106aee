//! Repository for the per-kind subtype tables.
//!
//! Dispatches on [`ShapeKind`] to the table holding the kind's row. Writes
//! take a transaction so they commit together with the owning shape row.

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tabletop_core::shape_kind::ShapeKind;
use tabletop_core::types::ShapeId;

use crate::models::subtype::{
    AssetRect, Circle, CircularToken, Line, MultiLine, Polygon, Rect, ShapeSubtype, Text,
};

/// Provides insert, lookup and removal of subtype rows.
pub struct ShapeSubtypeRepo;

impl ShapeSubtypeRepo {
    /// Insert the subtype row for the shape `uuid` into its kind's table.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        uuid: ShapeId,
        subtype: &ShapeSubtype,
    ) -> Result<(), sqlx::Error> {
        let conn = &mut **tx;
        match subtype {
            ShapeSubtype::AssetRect(r) => {
                sqlx::query(
                    "INSERT INTO asset_rects (uuid, width, height, src) VALUES ($1, $2, $3, $4)",
                )
                .bind(uuid)
                .bind(r.base.width)
                .bind(r.base.height)
                .bind(&r.src)
                .execute(conn)
                .await?
            }
            ShapeSubtype::Circle(c) => {
                sqlx::query("INSERT INTO circles (uuid, radius) VALUES ($1, $2)")
                    .bind(uuid)
                    .bind(c.radius)
                    .execute(conn)
                    .await?
            }
            ShapeSubtype::CircularToken(t) => {
                sqlx::query(
                    "INSERT INTO circular_tokens (uuid, radius, text, font) VALUES ($1, $2, $3, $4)",
                )
                .bind(uuid)
                .bind(t.circle.radius)
                .bind(&t.text)
                .bind(&t.font)
                .execute(conn)
                .await?
            }
            ShapeSubtype::Line(l) => {
                sqlx::query("INSERT INTO lines (uuid, x2, y2, line_width) VALUES ($1, $2, $3, $4)")
                    .bind(uuid)
                    .bind(l.x2)
                    .bind(l.y2)
                    .bind(l.line_width)
                    .execute(conn)
                    .await?
            }
            ShapeSubtype::MultiLine(m) => {
                sqlx::query("INSERT INTO multi_lines (uuid, line_width, points) VALUES ($1, $2, $3)")
                    .bind(uuid)
                    .bind(m.line_width)
                    .bind(Json(&m.points))
                    .execute(conn)
                    .await?
            }
            ShapeSubtype::Polygon(p) => {
                sqlx::query("INSERT INTO polygons (uuid, vertices) VALUES ($1, $2)")
                    .bind(uuid)
                    .bind(Json(&p.vertices))
                    .execute(conn)
                    .await?
            }
            ShapeSubtype::Rect(r) => {
                sqlx::query("INSERT INTO rects (uuid, width, height) VALUES ($1, $2, $3)")
                    .bind(uuid)
                    .bind(r.base.width)
                    .bind(r.base.height)
                    .execute(conn)
                    .await?
            }
            ShapeSubtype::Text(t) => {
                sqlx::query("INSERT INTO texts (uuid, text, font, angle) VALUES ($1, $2, $3, $4)")
                    .bind(uuid)
                    .bind(&t.text)
                    .bind(&t.font)
                    .bind(t.angle)
                    .execute(conn)
                    .await?
            }
        };
        Ok(())
    }

    /// Fetch the subtype row of `kind` for the shape `uuid`.
    ///
    /// Returns `None` if the kind's table has no row for the shape.
    pub async fn find(
        pool: &PgPool,
        kind: ShapeKind,
        uuid: ShapeId,
    ) -> Result<Option<ShapeSubtype>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE uuid = $1",
            kind.field_names().join(", "),
            kind.table_name()
        );
        let subtype = match kind {
            ShapeKind::AssetRect => {
                Self::fetch::<AssetRect>(pool, &query, uuid).await?.map(ShapeSubtype::AssetRect)
            }
            ShapeKind::Circle => {
                Self::fetch::<Circle>(pool, &query, uuid).await?.map(ShapeSubtype::Circle)
            }
            ShapeKind::CircularToken => Self::fetch::<CircularToken>(pool, &query, uuid)
                .await?
                .map(ShapeSubtype::CircularToken),
            ShapeKind::Line => Self::fetch::<Line>(pool, &query, uuid).await?.map(ShapeSubtype::Line),
            ShapeKind::MultiLine => {
                Self::fetch::<MultiLine>(pool, &query, uuid).await?.map(ShapeSubtype::MultiLine)
            }
            ShapeKind::Polygon => {
                Self::fetch::<Polygon>(pool, &query, uuid).await?.map(ShapeSubtype::Polygon)
            }
            ShapeKind::Rect => Self::fetch::<Rect>(pool, &query, uuid).await?.map(ShapeSubtype::Rect),
            ShapeKind::Text => Self::fetch::<Text>(pool, &query, uuid).await?.map(ShapeSubtype::Text),
        };
        Ok(subtype)
    }

    /// Remove the subtype row of `kind` for the shape `uuid`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        tx: &mut Transaction<'_, Postgres>,
        kind: ShapeKind,
        uuid: ShapeId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE uuid = $1", kind.table_name());
        let result = sqlx::query(&query).bind(uuid).execute(&mut **tx).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch<T>(pool: &PgPool, query: &str, uuid: ShapeId) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        sqlx::query_as::<_, T>(query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }
}
