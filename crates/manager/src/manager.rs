//! Save and delete orchestration across the document and media stores.

use std::sync::Arc;

use folio_core::project::Project;
use folio_db::ProjectStore;
use folio_storage::path::project_folder;
use folio_storage::{delete_tree, DeleteReport, MediaSlot, MediaStore, ProgressTracker};

use crate::draft::ProjectDraft;
use crate::error::ManagerError;
use crate::media::PendingMedia;
use crate::state::{AdminState, Notice, Phase};

/// Result of [`ProjectManager::delete_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether a document existed for the id.
    pub existed: bool,
    pub media: DeleteReport,
}

/// Runs admin operations against the configured stores.
///
/// Nothing here is transactional. A save uploads media before writing the
/// document, and a delete removes the document before the media, so a
/// failure part way leaves orphaned files rather than dangling URLs.
#[derive(Clone)]
pub struct ProjectManager {
    projects: Arc<dyn ProjectStore>,
    media: Arc<dyn MediaStore>,
    progress: ProgressTracker,
}

impl ProjectManager {
    pub fn new(projects: Arc<dyn ProjectStore>, media: Arc<dyn MediaStore>) -> Self {
        Self {
            projects,
            media,
            progress: ProgressTracker::new(),
        }
    }

    /// Upload progress of the current (or last) batch.
    ///
    /// One tracker is shared by every save on this manager. Starting a batch
    /// clears it, so with concurrent saves the last batch to start wins.
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn projects(&self) -> &Arc<dyn ProjectStore> {
        &self.projects
    }

    pub fn media(&self) -> &Arc<dyn MediaStore> {
        &self.media
    }

    // -----------------------------------------------------------------------
    // Stateless operations
    // -----------------------------------------------------------------------

    pub async fn list(&self) -> Result<Vec<Project>, ManagerError> {
        Ok(self.projects.list().await?)
    }

    /// Validate, upload `media` in order, then overwrite the document.
    ///
    /// Uploaded URLs replace the draft's media per field; fields with no new
    /// upload keep the draft's URLs. Returns the stored record.
    pub async fn save_project(
        &self,
        draft: &ProjectDraft,
        types: &[String],
        authors: &[String],
        media: PendingMedia,
    ) -> Result<Project, ManagerError> {
        draft.check()?;

        let queue = media.into_queue(&draft.id)?;
        self.progress.clear();
        let uploaded = queue.run(self.media.as_ref(), &self.progress).await?;

        let mut project = draft.to_project(types, authors);
        let mut images = Vec::new();
        let mut videos = Vec::new();
        for upload in uploaded {
            match upload.slot {
                MediaSlot::MainImage => project.main_image = Some(upload.url),
                MediaSlot::Image => images.push(upload.url),
                MediaSlot::Video => videos.push(upload.url),
            }
        }
        if !images.is_empty() {
            project.images = images;
        }
        if !videos.is_empty() {
            project.videos = videos;
        }

        self.projects.put(&project).await?;
        tracing::info!(project_id = %project.id, "Saved project");
        Ok(project)
    }

    /// Delete the document, then every media object under `projects/{id}`.
    ///
    /// If the document delete fails nothing else happens. If the media
    /// delete fails the document is already gone.
    pub async fn delete_project(&self, id: &str) -> Result<DeleteOutcome, ManagerError> {
        let folder = project_folder(id)?;

        let existed = self.projects.delete(id).await?;
        let media = delete_tree(self.media.as_ref(), &folder).await?;

        tracing::info!(
            project_id = %id,
            existed,
            media_objects = media.deleted.len(),
            "Deleted project"
        );
        Ok(DeleteOutcome { existed, media })
    }

    // -----------------------------------------------------------------------
    // Session operations
    // -----------------------------------------------------------------------

    /// Reload the session's project list. A failure is logged and leaves
    /// the cached list as it was.
    pub async fn refresh(&self, state: &mut AdminState) {
        match self.projects.list().await {
            Ok(projects) => state.projects = projects,
            Err(e) => tracing::error!(error = %e, "Error fetching projects"),
        }
    }

    /// Save the session's draft.
    ///
    /// Returns `Ok(None)` when the draft was rejected; the reason is left
    /// in the session notice and nothing was written. On success the form
    /// is reset and the list reloaded.
    pub async fn save(
        &self,
        state: &mut AdminState,
        media: PendingMedia,
    ) -> Result<Option<Project>, ManagerError> {
        ensure_idle(state)?;

        if let Err(ManagerError::Validation(message)) = state.draft.check() {
            state.notice = Some(Notice::Rejected(message));
            return Ok(None);
        }

        state.phase = Phase::Saving;
        let result = self
            .save_project(&state.draft, &state.types, &state.authors, media)
            .await;
        state.phase = Phase::Idle;

        let project = result.inspect_err(|e| tracing::error!(error = %e, "Error saving project"))?;
        state.notice = Some(Notice::Saved {
            id: project.id.clone(),
            updated: state.editing,
        });
        state.reset_form();
        self.refresh(state).await;
        Ok(Some(project))
    }

    /// Delete a project and its media, then reload the list.
    pub async fn delete(
        &self,
        state: &mut AdminState,
        id: &str,
    ) -> Result<DeleteOutcome, ManagerError> {
        ensure_idle(state)?;

        state.phase = Phase::Deleting;
        let result = self.delete_project(id).await;
        state.phase = Phase::Idle;

        let outcome = result.inspect_err(|e| tracing::error!(project_id = %id, error = %e, "Error deleting project"))?;
        state.notice = Some(Notice::Deleted { id: id.to_string() });
        self.refresh(state).await;
        Ok(outcome)
    }
}

fn ensure_idle(state: &AdminState) -> Result<(), ManagerError> {
    match state.phase {
        Phase::Idle => Ok(()),
        Phase::Locked => Err(ManagerError::Locked),
        Phase::Saving | Phase::Deleting => Err(ManagerError::Busy),
    }
}
