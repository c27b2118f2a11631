//! Ordered, single-worker upload of a batch of files.
//!
//! Tasks run strictly one after another in insertion order. The first
//! failure stops the queue; uploads that already finished stay in storage
//! and are handed back in [`UploadFailure::completed`].

use std::collections::VecDeque;

use bytes::Bytes;

use crate::error::StorageError;
use crate::path::{MediaSlot, ObjectPath};
use crate::progress::ProgressTracker;
use crate::store::MediaStore;

/// One file waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub slot: MediaSlot,
    pub file_name: String,
    pub path: ObjectPath,
    pub data: Bytes,
}

impl UploadTask {
    /// Build a task for `file_name` in `slot` of project `project_id`.
    pub fn new(
        project_id: &str,
        slot: MediaSlot,
        file_name: impl Into<String>,
        data: Bytes,
    ) -> Result<Self, StorageError> {
        let file_name = file_name.into();
        let path = slot.object_path(project_id, &file_name)?;
        Ok(Self {
            slot,
            file_name,
            path,
            data,
        })
    }
}

/// A finished upload resolved to its download URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub slot: MediaSlot,
    pub file_name: String,
    pub path: ObjectPath,
    pub url: String,
}

/// The queue stopped at `file_name`.
#[derive(Debug, thiserror::Error)]
#[error("Upload of '{file_name}' to {path} failed: {source}")]
pub struct UploadFailure {
    pub file_name: String,
    pub path: ObjectPath,
    /// Uploads that finished before the failure. They are not rolled back.
    pub completed: Vec<CompletedUpload>,
    #[source]
    pub source: StorageError,
}

#[derive(Debug, Default)]
pub struct UploadQueue {
    tasks: VecDeque<UploadTask>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: UploadTask) {
        self.tasks.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Upload every task in order, reporting progress under each file name.
    pub async fn run(
        mut self,
        store: &dyn MediaStore,
        progress: &ProgressTracker,
    ) -> Result<Vec<CompletedUpload>, UploadFailure> {
        let mut completed = Vec::with_capacity(self.tasks.len());

        while let Some(task) = self.tasks.pop_front() {
            let UploadTask {
                slot,
                file_name,
                path,
                data,
            } = task;
            tracing::debug!(file = %file_name, path = %path, bytes = data.len(), "Uploading");

            let report = |sent: u64, total: u64| progress.report(&file_name, sent, total);
            let outcome = match store.upload(&path, data, &report).await {
                Ok(object) => store.download_url(&object).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(url) => completed.push(CompletedUpload {
                    slot,
                    file_name,
                    path,
                    url,
                }),
                Err(source) => {
                    tracing::error!(
                        file = %file_name,
                        path = %path,
                        error = %source,
                        completed = completed.len(),
                        remaining = self.tasks.len(),
                        "Upload failed, abandoning batch"
                    );
                    return Err(UploadFailure {
                        file_name,
                        path,
                        completed,
                        source,
                    });
                }
            }
        }

        Ok(completed)
    }
}
