//! Domain types and pure rules for tabletop map shapes.
//!
//! Nothing in this crate touches the database; the `db` crate builds on it.

pub mod error;
pub mod shape_kind;
pub mod types;
pub mod visibility;
