//! The closed set of shape kinds and their subtype tables.
//!
//! A shape's `type_` column holds one of the discriminator strings below.
//! Each kind owns a subtype table keyed by the shape's uuid, and the kind's
//! fields are merged into the shape payload at the top level, so no subtype
//! field may share a name with [`BASE_FIELDS`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Payload field names
// ---------------------------------------------------------------------------

/// Top-level fields of every serialized shape, before subtype fields are merged.
pub const BASE_FIELDS: &[&str] = &[
    "uuid",
    "layer",
    "type_",
    "x",
    "y",
    "name",
    "name_visible",
    "fill_colour",
    "stroke_colour",
    "vision_obstruction",
    "movement_obstruction",
    "is_token",
    "annotation",
    "draw_operator",
    "options",
    "owners",
    "trackers",
    "auras",
];

const BASE_RECT_FIELDS: &[&str] = &["width", "height"];

// ---------------------------------------------------------------------------
// ShapeKind
// ---------------------------------------------------------------------------

/// Discriminator naming a shape's subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    AssetRect,
    Circle,
    CircularToken,
    Line,
    MultiLine,
    Polygon,
    Rect,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        Self::AssetRect,
        Self::Circle,
        Self::CircularToken,
        Self::Line,
        Self::MultiLine,
        Self::Polygon,
        Self::Rect,
        Self::Text,
    ];

    /// The discriminator string stored in `shapes.type_`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetRect => "assetrect",
            Self::Circle => "circle",
            Self::CircularToken => "circulartoken",
            Self::Line => "line",
            Self::MultiLine => "multiline",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Text => "text",
        }
    }

    /// Name of the table holding this kind's subtype rows.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::AssetRect => "asset_rects",
            Self::Circle => "circles",
            Self::CircularToken => "circular_tokens",
            Self::Line => "lines",
            Self::MultiLine => "multi_lines",
            Self::Polygon => "polygons",
            Self::Rect => "rects",
            Self::Text => "texts",
        }
    }

    /// Payload fields contributed by this kind's subtype row (its uuid excluded).
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::AssetRect => &["width", "height", "src"],
            Self::Circle => &["radius"],
            Self::CircularToken => &["radius", "text", "font"],
            Self::Line => &["x2", "y2", "line_width"],
            Self::MultiLine => &["line_width", "points"],
            Self::Polygon => &["vertices"],
            Self::Rect => BASE_RECT_FIELDS,
            Self::Text => &["text", "font", "angle"],
        }
    }
}

impl FromStr for ShapeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownShapeKind(s.to_string()))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
