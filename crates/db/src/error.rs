use folio_core::error::CoreError;

/// Errors raised by [`crate::ProjectStore`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error (validation, undecodable document).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
