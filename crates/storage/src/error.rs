/// Errors raised by [`crate::MediaStore`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A remote backend (S3) rejected the request.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
