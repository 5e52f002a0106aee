use crate::shape_kind::ShapeKind;
use crate::types::ShapeId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A `type_` discriminator that names no registered subtype table.
    #[error("Unknown shape type '{0}'")]
    UnknownShapeKind(String),

    /// The subtype table for `kind` holds no row for the shape.
    #[error("Missing {kind} subtype row for shape {uuid}")]
    MissingSubtype { kind: ShapeKind, uuid: ShapeId },

    #[error("Subtype mismatch: shape declares '{expected}' but subtype is '{found}'")]
    SubtypeMismatch {
        expected: ShapeKind,
        found: ShapeKind,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// `true` for failures that mean the stored shape data is inconsistent.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownShapeKind(_) | Self::MissingSubtype { .. } | Self::SubtypeMismatch { .. }
        )
    }
}
