//! Repository for the `shapes` table.
//!
//! A shape and its subtype row are written and removed together.
//! [`ShapeRepo::load_view`] gathers everything a shape payload needs and
//! hands it to [`ShapeView::compose`].

use sqlx::PgPool;
use tabletop_core::error::CoreError;
use tabletop_core::shape_kind::ShapeKind;
use tabletop_core::types::{DbId, ShapeId};
use tabletop_core::visibility::Viewer;

use crate::error::{DbError, DbResult};
use crate::models::shape::{CreateShape, Shape, UpdateShape};
use crate::models::shape_view::{ShapeParts, ShapeView};
use crate::repositories::{AuraRepo, LayerRepo, ShapeOwnerRepo, ShapeSubtypeRepo, TrackerRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "uuid, layer_id, type_, x, y, name, name_visible, fill_colour, \
    stroke_colour, vision_obstruction, movement_obstruction, is_token, annotation, \
    draw_operator, \"index\", options";

/// Provides CRUD and payload assembly for shapes.
pub struct ShapeRepo;

impl ShapeRepo {
    /// Insert a shape and its subtype row in one transaction.
    ///
    /// The stored `type_` is taken from the subtype, so the pair always agrees.
    pub async fn create(pool: &PgPool, input: &CreateShape) -> Result<Shape, sqlx::Error> {
        let kind = input.subtype.kind();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO shapes \
                (uuid, layer_id, type_, x, y, name, name_visible, fill_colour, stroke_colour, \
                 vision_obstruction, movement_obstruction, is_token, annotation, draw_operator, \
                 \"index\", options) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true), COALESCE($8, '#000'), \
                 COALESCE($9, '#fff'), COALESCE($10, false), COALESCE($11, false), \
                 COALESCE($12, false), COALESCE($13, ''), COALESCE($14, 'source-over'), $15, $16) \
             RETURNING {COLUMNS}"
        );
        let shape = sqlx::query_as::<_, Shape>(&query)
            .bind(input.uuid)
            .bind(input.layer_id)
            .bind(kind.as_str())
            .bind(input.x)
            .bind(input.y)
            .bind(&input.name)
            .bind(input.name_visible)
            .bind(&input.fill_colour)
            .bind(&input.stroke_colour)
            .bind(input.vision_obstruction)
            .bind(input.movement_obstruction)
            .bind(input.is_token)
            .bind(&input.annotation)
            .bind(&input.draw_operator)
            .bind(input.index)
            .bind(&input.options)
            .fetch_one(&mut *tx)
            .await?;

        ShapeSubtypeRepo::insert(&mut tx, shape.uuid, &input.subtype).await?;

        tx.commit().await?;
        tracing::debug!(
            shape = %shape.uuid,
            kind = %kind,
            layer_id = shape.layer_id,
            "Created shape"
        );
        Ok(shape)
    }

    /// Find a shape by its uuid.
    pub async fn find_by_id(pool: &PgPool, uuid: ShapeId) -> Result<Option<Shape>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shapes WHERE uuid = $1");
        sqlx::query_as::<_, Shape>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// List the shapes of a layer in z-order.
    pub async fn list_by_layer(pool: &PgPool, layer_id: DbId) -> Result<Vec<Shape>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM shapes WHERE layer_id = $1 ORDER BY \"index\", uuid");
        sqlx::query_as::<_, Shape>(&query)
            .bind(layer_id)
            .fetch_all(pool)
            .await
    }

    /// Update a shape's base fields. Only non-`None` fields are applied;
    /// a set `name` or `options` is never reset to NULL.
    ///
    /// Returns `None` if no shape with the given uuid exists.
    pub async fn update(
        pool: &PgPool,
        uuid: ShapeId,
        input: &UpdateShape,
    ) -> Result<Option<Shape>, sqlx::Error> {
        let query = format!(
            "UPDATE shapes SET \
                x = COALESCE($2, x), \
                y = COALESCE($3, y), \
                name = COALESCE($4, name), \
                name_visible = COALESCE($5, name_visible), \
                fill_colour = COALESCE($6, fill_colour), \
                stroke_colour = COALESCE($7, stroke_colour), \
                vision_obstruction = COALESCE($8, vision_obstruction), \
                movement_obstruction = COALESCE($9, movement_obstruction), \
                is_token = COALESCE($10, is_token), \
                annotation = COALESCE($11, annotation), \
                draw_operator = COALESCE($12, draw_operator), \
                \"index\" = COALESCE($13, \"index\"), \
                options = COALESCE($14, options) \
             WHERE uuid = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shape>(&query)
            .bind(uuid)
            .bind(input.x)
            .bind(input.y)
            .bind(&input.name)
            .bind(input.name_visible)
            .bind(&input.fill_colour)
            .bind(&input.stroke_colour)
            .bind(input.vision_obstruction)
            .bind(input.movement_obstruction)
            .bind(input.is_token)
            .bind(&input.annotation)
            .bind(&input.draw_operator)
            .bind(input.index)
            .bind(&input.options)
            .fetch_optional(pool)
            .await
    }

    /// Delete a shape together with its subtype row.
    ///
    /// Trackers, auras and ownership rows are removed by cascade. Returns
    /// `false` if no shape with the given uuid exists.
    pub async fn delete(pool: &PgPool, uuid: ShapeId) -> DbResult<bool> {
        let mut tx = pool.begin().await?;

        let type_: Option<String> =
            sqlx::query_scalar("SELECT type_ FROM shapes WHERE uuid = $1 FOR UPDATE")
                .bind(uuid)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(type_) = type_ else {
            return Ok(false);
        };
        let kind = type_
            .parse::<ShapeKind>()
            .inspect_err(|e| log_integrity_failure(uuid, e))?;

        if !ShapeSubtypeRepo::delete(&mut tx, kind, uuid).await? {
            tracing::warn!(shape = %uuid, kind = %kind, "Deleting shape without a subtype row");
        }
        sqlx::query("DELETE FROM shapes WHERE uuid = $1")
            .bind(uuid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(shape = %uuid, kind = %kind, "Deleted shape");
        Ok(true)
    }

    /// Load the rows a shape payload is composed from.
    ///
    /// When `viewer` is given and does not own the shape, hidden trackers
    /// and auras are filtered out in the queries.
    pub async fn load_parts(
        pool: &PgPool,
        shape: Shape,
        viewer: Option<&Viewer>,
    ) -> DbResult<ShapeParts> {
        let owners = ShapeOwnerRepo::list_owner_names(pool, shape.uuid).await?;
        let layer = LayerRepo::find_by_id(pool, shape.layer_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "layer",
                id: shape.layer_id.to_string(),
            })?;

        let visible_only = viewer.is_some_and(|v| !v.owns(owners.as_slice()));
        let trackers = TrackerRepo::list_for_shape(pool, shape.uuid, visible_only).await?;
        let auras = AuraRepo::list_for_shape(pool, shape.uuid, visible_only).await?;

        let kind = shape.kind()?;
        let subtype = ShapeSubtypeRepo::find(pool, kind, shape.uuid)
            .await?
            .ok_or(CoreError::MissingSubtype {
                kind,
                uuid: shape.uuid,
            })?;

        Ok(ShapeParts {
            shape,
            layer_name: layer.name,
            owners,
            trackers,
            auras,
            subtype,
        })
    }

    /// Build the payload of one shape for `viewer`.
    ///
    /// Fails with `NotFound` for an unknown uuid and with an integrity error
    /// when the shape's kind or subtype row is inconsistent. Never returns a
    /// partial payload.
    pub async fn load_view(pool: &PgPool, uuid: ShapeId, viewer: &Viewer) -> DbResult<ShapeView> {
        let shape = Self::find_by_id(pool, uuid)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "shape",
                id: uuid.to_string(),
            })?;
        Self::view_of(pool, shape, viewer).await
    }

    /// Build the payloads of every shape on a layer for `viewer`, in z-order.
    pub async fn list_views_for_layer(
        pool: &PgPool,
        layer_id: DbId,
        viewer: &Viewer,
    ) -> DbResult<Vec<ShapeView>> {
        let shapes = Self::list_by_layer(pool, layer_id).await?;
        let mut views = Vec::with_capacity(shapes.len());
        for shape in shapes {
            views.push(Self::view_of(pool, shape, viewer).await?);
        }
        Ok(views)
    }

    async fn view_of(pool: &PgPool, shape: Shape, viewer: &Viewer) -> DbResult<ShapeView> {
        let uuid = shape.uuid;
        let view = Self::load_parts(pool, shape, Some(viewer))
            .await
            .and_then(|parts| ShapeView::compose(parts, viewer).map_err(DbError::from))
            .inspect_err(|e| {
                if let DbError::Core(core) = e {
                    log_integrity_failure(uuid, core);
                }
            })?;
        tracing::debug!(
            shape = %uuid,
            kind = %view.kind(),
            viewer = %viewer.name,
            "Composed shape view"
        );
        Ok(view)
    }
}

fn log_integrity_failure(uuid: ShapeId, err: &CoreError) {
    if err.is_integrity_failure() {
        tracing::error!(shape = %uuid, error = %err, "Shape data integrity failure");
    }
}
