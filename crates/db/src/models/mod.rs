//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is mutable
//!
//! [`shape_view`] holds the composed, viewer-specific shape payload.

pub mod aura;
pub mod layer;
pub mod shape;
pub mod shape_owner;
pub mod shape_view;
pub mod subtype;
pub mod tracker;
pub mod user;
