//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod aura_repo;
pub mod layer_repo;
pub mod shape_owner_repo;
pub mod shape_repo;
pub mod subtype_repo;
pub mod tracker_repo;
pub mod user_repo;

pub use aura_repo::AuraRepo;
pub use layer_repo::LayerRepo;
pub use shape_owner_repo::ShapeOwnerRepo;
pub use shape_repo::ShapeRepo;
pub use subtype_repo::ShapeSubtypeRepo;
pub use tracker_repo::TrackerRepo;
pub use user_repo::UserRepo;
