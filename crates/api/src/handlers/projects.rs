//! Project admin API: raw records, multipart save, cascade delete, upload
//! progress.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::project::Project;
use folio_manager::{MediaFile, PendingMedia, ProjectDraft};
use folio_storage::FileProgress;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdminSecret;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
///
/// Every decodable record in store order, unsorted and undated ones included.
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = state.projects().list().await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state
        .projects()
        .get(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: &'static str,
    pub project: Project,
}

/// Parsed multipart body of a save request.
#[derive(Debug, Default)]
struct SaveForm {
    document: Option<serde_json::Value>,
    media: PendingMedia,
}

async fn read_save_form(mut multipart: Multipart) -> AppResult<SaveForm> {
    let mut form = SaveForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().unwrap_or("").to_string();
        match name.as_str() {
            "project" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let value = serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("'project' is not valid JSON: {e}"))
                })?;
                form.document = Some(value);
            }
            "main_image" | "images" | "videos" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // An unchosen file input arrives as an empty, unnamed part.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                match name.as_str() {
                    "main_image" => form.media.main_image = Some(MediaFile::new(file_name, data)),
                    _ if file_name.is_empty() => {
                        return Err(AppError::BadRequest(format!(
                            "Files in '{name}' need a file name"
                        )));
                    }
                    "images" => form.media.images.push(MediaFile::new(file_name, data)),
                    _ => form.media.videos.push(MediaFile::new(file_name, data)),
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

/// PUT /api/v1/projects/{id}
///
/// Multipart body: a `project` JSON part plus optional `main_image`,
/// `images` and `videos` file parts. Files upload in that order before the
/// record is overwritten. Media fields left empty in the JSON keep the
/// stored record's media, so an edit without new files does not drop them.
pub async fn save_project(
    _: RequireAdminSecret,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<SaveResponse>>)> {
    let form = read_save_form(multipart).await?;
    let document = form
        .document
        .ok_or_else(|| AppError::BadRequest("Missing required 'project' field".into()))?;
    let incoming = Project::from_document(&id, document)?;

    let existing = state.projects().get(&id).await?;
    let mut draft = ProjectDraft::from(&incoming);
    if let Some(previous) = &existing {
        if draft.main_image.is_none() {
            draft.main_image.clone_from(&previous.main_image);
        }
        if draft.images.is_empty() {
            draft.images.clone_from(&previous.images);
        }
        if draft.videos.is_empty() {
            draft.videos.clone_from(&previous.videos);
        }
        if draft.movie.is_none() {
            draft.movie.clone_from(&previous.movie);
        }
    }

    let project = state
        .manager
        .save_project(&draft, &incoming.types, &incoming.authors, form.media)
        .await?;

    let (status, message) = if existing.is_some() {
        (StatusCode::OK, "Project updated successfully!")
    } else {
        (StatusCode::CREATED, "Project added successfully!")
    };
    Ok((
        status,
        Json(DataResponse {
            data: SaveResponse { message, project },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub id: String,
    /// Whether a record existed. Media is cleared either way.
    pub existed: bool,
    pub media_deleted: usize,
}

/// DELETE /api/v1/projects/{id}
///
/// Removes the record, then every media object under `projects/{id}`.
pub async fn delete_project(
    _: RequireAdminSecret,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<DeleteResponse>>> {
    let outcome = state.manager.delete_project(&id).await?;
    Ok(Json(DataResponse {
        data: DeleteResponse {
            message: "Project deleted successfully!",
            id,
            existed: outcome.existed,
            media_deleted: outcome.media.deleted.len(),
        },
    }))
}

/// GET /api/v1/uploads/progress
///
/// Per-file progress of the most recent upload batch. Progress is not keyed
/// by project: a save that starts later replaces the entries of one still
/// running.
pub async fn upload_progress(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<FileProgress>>> {
    Json(DataResponse {
        data: state.manager.progress().snapshot(),
    })
}
