//! The document store contract for the `projects` collection.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::project::Project;

use crate::error::DbError;

/// List/get/put/delete over project documents keyed by id.
///
/// `put` always replaces the whole document. There is no version check;
/// concurrent writers to one id resolve as last write wins.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Every decodable project. Documents that fail coercion are skipped
    /// with a warning so one bad entry cannot blank the gallery.
    async fn list(&self) -> Result<Vec<Project>, DbError>;

    /// One project, or `None` if no document has this id.
    async fn get(&self, id: &str) -> Result<Option<Project>, DbError>;

    /// Create or fully overwrite the document at `project.id`.
    async fn put(&self, project: &Project) -> Result<(), DbError>;

    /// Remove the document. Returns `true` if one existed.
    async fn delete(&self, id: &str) -> Result<bool, DbError>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> Result<(), DbError>;
}

/// Reject writes without an id before they reach the backend.
pub(crate) fn ensure_id(project: &Project) -> Result<(), DbError> {
    if project.id.trim().is_empty() {
        return Err(CoreError::Validation("Project ID is required".into()).into());
    }
    Ok(())
}

/// Coerce a batch of `(id, document)` rows, skipping undecodable ones.
pub(crate) fn decode_all(rows: Vec<(String, serde_json::Value)>) -> Vec<Project> {
    rows.into_iter()
        .filter_map(|(id, data)| match Project::from_document(&id, data) {
            Ok(project) => Some(project),
            Err(e) => {
                tracing::warn!(project_id = %id, error = %e, "Skipping undecodable project document");
                None
            }
        })
        .collect()
}
