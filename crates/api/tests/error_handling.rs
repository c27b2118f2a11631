//! `AppError` to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use folio_api::error::AppError;
use folio_core::error::CoreError;
use folio_db::DbError;
use folio_manager::ManagerError;
use folio_storage::{MediaSlot, StorageError, UploadFailure};
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: "demo".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id demo not found");
}

#[tokio::test]
async fn draft_validation_returns_400_with_form_message() {
    let err = AppError::Manager(ManagerError::Validation("Project ID is required!".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Project ID is required!");
}

#[tokio::test]
async fn nested_core_errors_keep_their_mapping() {
    let err = AppError::Manager(ManagerError::Db(DbError::Core(CoreError::Validation(
        "bad document".into(),
    ))));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Incorrect password!".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn upload_failure_returns_502_naming_the_file() {
    let path = MediaSlot::Image.object_path("demo", "b.jpg").unwrap();
    let failure = UploadFailure {
        file_name: "b.jpg".into(),
        path,
        completed: Vec::new(),
        source: StorageError::Backend("connection reset".into()),
    };
    let err = AppError::Manager(ManagerError::from(failure));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPLOAD_FAILED");
    assert_eq!(json["error"], "Upload of 'b.jpg' failed");
}

#[tokio::test]
async fn storage_backend_error_is_sanitized() {
    let err = AppError::Storage(StorageError::Backend("secret bucket detail".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn invalid_media_path_returns_400() {
    let err = AppError::Storage(StorageError::InvalidPath("../x".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PATH");
}
