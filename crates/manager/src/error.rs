use folio_db::DbError;
use folio_storage::{StorageError, UploadFailure};

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// The draft failed validation. Nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("Admin surface is locked")]
    Locked,

    #[error("Another save or delete is in progress")]
    Busy,

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An upload failed. Files uploaded before it stay in storage.
    #[error(transparent)]
    Upload(Box<UploadFailure>),
}

impl From<UploadFailure> for ManagerError {
    fn from(failure: UploadFailure) -> Self {
        Self::Upload(Box::new(failure))
    }
}
