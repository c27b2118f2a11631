use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_db::DbError;
use folio_manager::ManagerError;
use folio_storage::StorageError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the error of every workspace crate and implements [`IntoResponse`]
/// to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// A missing resource with a display-ready message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core(core),
            AppError::Db(db) => classify_db(db),
            AppError::Storage(storage) => classify_storage(storage),
            AppError::Manager(manager) => classify_manager(manager),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal("Internal error", msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(context: &str, detail: &dyn std::fmt::Display) -> Classified {
    tracing::error!(error = %detail, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => internal("Internal core error", msg),
    }
}

fn classify_db(err: &DbError) -> Classified {
    match err {
        DbError::Core(core) => classify_core(core),
        DbError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        DbError::Database(other) => internal("Database error", other),
    }
}

fn classify_storage(err: &StorageError) -> Classified {
    match err {
        StorageError::NotFound(path) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Media object {path} not found"),
        ),
        StorageError::InvalidPath(path) => (
            StatusCode::BAD_REQUEST,
            "INVALID_PATH",
            format!("Invalid media path: {path}"),
        ),
        StorageError::Io(_) | StorageError::Backend(_) => internal("Storage error", err),
    }
}

fn classify_manager(err: &ManagerError) -> Classified {
    match err {
        ManagerError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        ManagerError::Locked => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string()),
        ManagerError::Busy => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        ManagerError::Db(db) => classify_db(db),
        ManagerError::Storage(storage) => classify_storage(storage),
        ManagerError::Upload(failure) => {
            tracing::error!(
                file = %failure.file_name,
                orphaned = failure.completed.len(),
                error = %failure.source,
                "Media upload failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                "UPLOAD_FAILED",
                format!("Upload of '{}' failed", failure.file_name),
            )
        }
    }
}
