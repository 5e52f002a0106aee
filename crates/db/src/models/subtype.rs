//! Shape subtype rows.
//!
//! Every shape has exactly one row in the table of its kind, sharing the
//! shape's uuid as primary key. The structs below hold only the kind's own
//! columns; the uuid is implied by the owning shape and never serialized.
//! [`BaseRect`] and [`Circle`] are field groups shared by several kinds.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tabletop_core::shape_kind::ShapeKind;
use tabletop_core::types::Point;

// ---------------------------------------------------------------------------
// Shared field groups
// ---------------------------------------------------------------------------

/// Width and height shared by [`Rect`] and [`AssetRect`]. Never stored alone.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct BaseRect {
    pub width: f64,
    pub height: f64,
}

// ---------------------------------------------------------------------------
// Subtype rows
// ---------------------------------------------------------------------------

/// A row from `asset_rects`: an image drawn into a rectangle.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AssetRect {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub base: BaseRect,
    pub src: String,
}

/// A row from `circles`. Also the base of [`CircularToken`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

/// A row from `circular_tokens`: a circle with a text label.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CircularToken {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub circle: Circle,
    pub text: String,
    pub font: String,
}

/// A row from `lines`. The start point is the shape's `(x, y)`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Line {
    pub x2: f64,
    pub y2: f64,
    pub line_width: i32,
}

/// A row from `multi_lines`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct MultiLine {
    pub line_width: i32,
    #[sqlx(json)]
    pub points: Vec<Point>,
}

/// A row from `polygons`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Polygon {
    #[sqlx(json)]
    pub vertices: Vec<Point>,
}

/// A row from `rects`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Rect {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub base: BaseRect,
}

/// A row from `texts`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    pub font: String,
    pub angle: f64,
}

// ---------------------------------------------------------------------------
// ShapeSubtype
// ---------------------------------------------------------------------------

/// The subtype row of a shape, one arm per [`ShapeKind`].
///
/// Serialized internally tagged by `type_` so that, flattened into a shape
/// payload, it contributes the discriminator and the kind's fields at the
/// top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type_", rename_all = "lowercase")]
pub enum ShapeSubtype {
    AssetRect(AssetRect),
    Circle(Circle),
    CircularToken(CircularToken),
    Line(Line),
    MultiLine(MultiLine),
    Polygon(Polygon),
    Rect(Rect),
    Text(Text),
}

impl ShapeSubtype {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::AssetRect(_) => ShapeKind::AssetRect,
            Self::Circle(_) => ShapeKind::Circle,
            Self::CircularToken(_) => ShapeKind::CircularToken,
            Self::Line(_) => ShapeKind::Line,
            Self::MultiLine(_) => ShapeKind::MultiLine,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Text(_) => ShapeKind::Text,
        }
    }
}
