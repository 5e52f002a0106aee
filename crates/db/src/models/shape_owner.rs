//! Shape ownership join model.

use serde::Serialize;
use sqlx::FromRow;
use tabletop_core::types::{DbId, ShapeId};

use crate::models::shape::ShapePath;

/// A row from the `shape_owners` table granting a user ownership of a shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShapeOwner {
    pub id: DbId,
    pub shape_uuid: ShapeId,
    pub user_id: DbId,
}

impl ShapeOwner {
    /// Debug label, e.g. `<ShapeOwner alice Goblin@tokens>`.
    pub fn label(&self, user_name: &str, shape: &ShapePath) -> String {
        format!("<ShapeOwner {user_name} {shape}>")
    }
}
