//! Aura entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tabletop_core::types::ShapeId;
use tabletop_core::visibility::Visible;
use uuid::Uuid;

use crate::models::shape::ShapePath;

/// A row from the `auras` table: a light or vision radius around a shape.
///
/// Serializes every column except the `shape_uuid` back reference.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Aura {
    pub uuid: Uuid,
    #[serde(skip_serializing)]
    pub shape_uuid: ShapeId,
    /// Whether the aura lights up the map for vision purposes.
    pub vision_source: bool,
    pub visible: bool,
    pub name: String,
    /// Bright radius.
    pub value: i32,
    /// Dim radius beyond `value`.
    pub dim: i32,
    pub colour: String,
}

impl Aura {
    /// Debug label, e.g. `<Aura Light Goblin@tokens>`.
    pub fn label(&self, shape: &ShapePath) -> String {
        format!("<Aura {} {shape}>", self.name)
    }
}

impl Visible for Aura {
    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// DTO for attaching a new aura to a shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAura {
    pub uuid: Uuid,
    pub vision_source: bool,
    pub visible: bool,
    pub name: String,
    pub value: i32,
    pub dim: i32,
    pub colour: String,
}

/// DTO for updating an aura. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAura {
    pub vision_source: Option<bool>,
    pub visible: Option<bool>,
    pub name: Option<String>,
    pub value: Option<i32>,
    pub dim: Option<i32>,
    pub colour: Option<String>,
}
