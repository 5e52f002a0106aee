//! The viewer-specific payload of a shape.
//!
//! [`ShapeView::compose`] merges a shape row, its resolved layer name and
//! owner names, its trackers and auras, and its subtype row into one flat
//! object, applying the visibility rules of
//! [`tabletop_core::visibility`]. It does no I/O; the repository layer
//! gathers the inputs (see `ShapeRepo::load_view`).

use serde::Serialize;
use tabletop_core::error::CoreError;
use tabletop_core::shape_kind::ShapeKind;
use tabletop_core::types::ShapeId;
use tabletop_core::visibility::{display_name, retain_visible, visible_annotation, Viewer};

use crate::models::aura::Aura;
use crate::models::shape::Shape;
use crate::models::subtype::ShapeSubtype;
use crate::models::tracker::Tracker;

/// A shape as sent to one viewer.
///
/// Serializes to a single flat object: the base shape fields (without the
/// layer id and z-order index), `owners`, `trackers`, `auras`, then the
/// `type_` discriminator and the subtype's own fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeView {
    pub uuid: ShapeId,
    /// Layer name, in place of the layer id.
    pub layer: String,
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
    pub options: Option<String>,
    pub owners: Vec<String>,
    pub trackers: Vec<Tracker>,
    pub auras: Vec<Aura>,
    #[serde(flatten)]
    pub subtype: ShapeSubtype,
}

/// Everything loaded for one shape, before visibility rules apply.
#[derive(Debug, Clone)]
pub struct ShapeParts {
    pub shape: Shape,
    pub layer_name: String,
    pub owners: Vec<String>,
    pub trackers: Vec<Tracker>,
    pub auras: Vec<Aura>,
    pub subtype: ShapeSubtype,
}

impl ShapeView {
    /// Build the payload `viewer` is allowed to see.
    ///
    /// Owners and the DM get the annotation and every tracker and aura.
    /// Everyone else gets an empty annotation and only the visible trackers
    /// and auras. A hidden name is replaced by the placeholder for all
    /// viewers. Fails if the subtype row is not of the kind the shape
    /// declares.
    pub fn compose(parts: ShapeParts, viewer: &Viewer) -> Result<Self, CoreError> {
        let ShapeParts {
            shape,
            layer_name,
            owners,
            trackers,
            auras,
            subtype,
        } = parts;

        let expected = shape.kind()?;
        let found = subtype.kind();
        if expected != found {
            return Err(CoreError::SubtypeMismatch { expected, found });
        }

        let owned = viewer.owns(owners.as_slice());

        Ok(Self {
            uuid: shape.uuid,
            layer: layer_name,
            x: shape.x,
            y: shape.y,
            name: display_name(shape.name.as_deref(), shape.name_visible),
            name_visible: shape.name_visible,
            fill_colour: shape.fill_colour,
            stroke_colour: shape.stroke_colour,
            vision_obstruction: shape.vision_obstruction,
            movement_obstruction: shape.movement_obstruction,
            is_token: shape.is_token,
            annotation: visible_annotation(&shape.annotation, owned),
            draw_operator: shape.draw_operator,
            options: shape.options,
            owners,
            trackers: retain_visible(trackers, owned),
            auras: retain_visible(auras, owned),
            subtype,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.subtype.kind()
    }
}
