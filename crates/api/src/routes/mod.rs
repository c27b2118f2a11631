pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the public view routes.
///
/// ```text
/// /                     gallery (?keyword=&criterion=&lang=)
/// /project-detail       detail (?id=&lang=)
/// /project-manager      admin gate (POST { "secret" })
/// ```
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::gallery::gallery))
        .route("/project-detail", get(handlers::gallery::project_detail))
        .route("/project-manager", post(handlers::admin::unlock))
}

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects                 list
/// /projects/{id}            get, save (PUT multipart), delete
/// /uploads/progress         per-file progress of the last upload batch
/// ```
///
/// Save and delete require the `x-admin-secret` header.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::projects::list_projects))
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project)
                .put(handlers::projects::save_project)
                .layer(DefaultBodyLimit::max(max_upload_bytes))
                .delete(handlers::projects::delete_project),
        )
        .route("/uploads/progress", get(handlers::projects::upload_progress))
}
