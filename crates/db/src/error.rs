use tabletop_core::error::CoreError;

/// Errors from operations that combine queries with domain checks.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error from `tabletop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;
