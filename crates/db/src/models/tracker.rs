//! Tracker entity model and DTOs.
//!
//! A tracker is a named value/max pair shown as a bar on a shape (hit
//! points, spell slots, ...). The pair is not ordered: `value` may exceed
//! `maxvalue`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tabletop_core::types::ShapeId;
use tabletop_core::visibility::Visible;
use uuid::Uuid;

use crate::models::shape::ShapePath;

/// A row from the `trackers` table.
///
/// Serializes every column except the `shape_uuid` back reference.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tracker {
    pub uuid: Uuid,
    #[serde(skip_serializing)]
    pub shape_uuid: ShapeId,
    pub visible: bool,
    pub name: String,
    pub value: i32,
    pub maxvalue: i32,
}

impl Tracker {
    /// Debug label, e.g. `<Tracker HP Goblin@tokens>`.
    pub fn label(&self, shape: &ShapePath) -> String {
        format!("<Tracker {} {shape}>", self.name)
    }
}

impl Visible for Tracker {
    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// DTO for attaching a new tracker to a shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTracker {
    pub uuid: Uuid,
    pub visible: bool,
    pub name: String,
    pub value: i32,
    pub maxvalue: i32,
}

/// DTO for updating a tracker. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTracker {
    pub visible: Option<bool>,
    pub name: Option<String>,
    pub value: Option<i32>,
    pub maxvalue: Option<i32>,
}
