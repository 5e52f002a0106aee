/// Users and layers use PostgreSQL BIGSERIAL keys.
pub type DbId = i64;

/// Shapes, trackers and auras are keyed by client-generated UUIDs.
pub type ShapeId = uuid::Uuid;

/// A 2D point stored as `[x, y]` in JSON columns.
pub type Point = [f64; 2];
