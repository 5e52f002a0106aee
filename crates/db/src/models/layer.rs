//! Layer entity model and DTOs.
//!
//! Layers belong to the wider campaign schema; only the fields shapes need
//! to resolve a layer's name and path live here.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tabletop_core::types::DbId;

/// A row from the `layers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Layer {
    pub id: DbId,
    pub name: String,
    /// Location the layer belongs to; empty for standalone layers.
    pub location: String,
}

impl Layer {
    /// `name@location`, or just `name` when the layer has no location.
    pub fn path(&self) -> String {
        if self.location.is_empty() {
            self.name.clone()
        } else {
            format!("{}@{}", self.name, self.location)
        }
    }
}

/// DTO for creating a new layer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLayer {
    pub name: String,
    pub location: Option<String>,
}
