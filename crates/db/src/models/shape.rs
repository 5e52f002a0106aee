//! Shape entity model and DTOs.
//!
//! A shape row carries the fields common to every drawable map object. Its
//! kind-specific fields live in one of the subtype tables, see
//! [`ShapeSubtype`].

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tabletop_core::error::CoreError;
use tabletop_core::shape_kind::ShapeKind;
use tabletop_core::types::{DbId, ShapeId};

use crate::models::layer::Layer;
use crate::models::subtype::ShapeSubtype;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `shapes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shape {
    pub uuid: ShapeId,
    pub layer_id: DbId,
    /// Discriminator naming the subtype table, see [`ShapeKind`].
    pub type_: String,
    pub x: f64,
    pub y: f64,
    pub name: Option<String>,
    pub name_visible: bool,
    pub fill_colour: String,
    pub stroke_colour: String,
    pub vision_obstruction: bool,
    pub movement_obstruction: bool,
    pub is_token: bool,
    pub annotation: String,
    pub draw_operator: String,
    /// Z-order within the layer.
    pub index: i32,
    /// Opaque client data, never interpreted here.
    pub options: Option<String>,
}

impl Shape {
    /// Parse the stored discriminator.
    pub fn kind(&self) -> Result<ShapeKind, CoreError> {
        self.type_.parse()
    }

    pub fn path(&self, layer: &Layer) -> ShapePath {
        ShapePath::new(self.name.as_deref(), layer)
    }

    /// Debug label, e.g. `<Shape Goblin@Tokens@Cave>`.
    pub fn label(&self, layer: &Layer) -> String {
        format!("<Shape {}>", self.path(layer))
    }
}

/// `name@layer-path`, used in debug labels of a shape and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePath(String);

impl ShapePath {
    pub fn new(shape_name: Option<&str>, layer: &Layer) -> Self {
        Self(format!("{}@{}", shape_name.unwrap_or_default(), layer.path()))
    }
}

impl fmt::Display for ShapePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a shape together with its subtype row.
///
/// The subtype is read from the same flat object, tagged by `type_`, so an
/// unregistered kind fails at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShape {
    pub uuid: ShapeId,
    pub layer_id: DbId,
    pub x: f64,
    pub y: f64,
    pub name: Option<String>,
    pub name_visible: Option<bool>,
    pub fill_colour: Option<String>,
    pub stroke_colour: Option<String>,
    pub vision_obstruction: Option<bool>,
    pub movement_obstruction: Option<bool>,
    pub is_token: Option<bool>,
    pub annotation: Option<String>,
    pub draw_operator: Option<String>,
    pub index: i32,
    pub options: Option<String>,
    #[serde(flatten)]
    pub subtype: ShapeSubtype,
}

impl CreateShape {
    /// A shape at `(x, y)` with every optional field left to its column default.
    pub fn new(uuid: ShapeId, layer_id: DbId, x: f64, y: f64, subtype: ShapeSubtype) -> Self {
        Self {
            uuid,
            layer_id,
            x,
            y,
            name: None,
            name_visible: None,
            fill_colour: None,
            stroke_colour: None,
            vision_obstruction: None,
            movement_obstruction: None,
            is_token: None,
            annotation: None,
            draw_operator: None,
            index: 0,
            options: None,
            subtype,
        }
    }
}

/// DTO for patching a shape's base fields. The kind and layer are immutable.
///
/// `None` leaves a column unchanged, so the nullable `name` and `options`
/// columns cannot be cleared back to NULL through this patch once set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShape {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub name: Option<String>,
    pub name_visible: Option<bool>,
    pub fill_colour: Option<String>,
    pub stroke_colour: Option<String>,
    pub vision_obstruction: Option<bool>,
    pub movement_obstruction: Option<bool>,
    pub is_token: Option<bool>,
    pub annotation: Option<String>,
    pub draw_operator: Option<String>,
    pub index: Option<i32>,
    pub options: Option<String>,
}
