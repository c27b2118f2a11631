//! Files chosen for upload alongside a save.

use bytes::Bytes;
use folio_storage::{MediaSlot, StorageError, UploadQueue, UploadTask};

#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub data: Bytes,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// New media for one save. Empty fields keep the record's existing media.
#[derive(Debug, Clone, Default)]
pub struct PendingMedia {
    pub main_image: Option<MediaFile>,
    pub images: Vec<MediaFile>,
    pub videos: Vec<MediaFile>,
}

impl PendingMedia {
    pub fn is_empty(&self) -> bool {
        self.main_image.is_none() && self.images.is_empty() && self.videos.is_empty()
    }

    /// Queue every file in upload order: main image, images, videos.
    pub fn into_queue(self, project_id: &str) -> Result<UploadQueue, StorageError> {
        let mut queue = UploadQueue::new();
        let files = self
            .main_image
            .into_iter()
            .map(|f| (MediaSlot::MainImage, f))
            .chain(self.images.into_iter().map(|f| (MediaSlot::Image, f)))
            .chain(self.videos.into_iter().map(|f| (MediaSlot::Video, f)));
        for (slot, file) in files {
            queue.push(UploadTask::new(project_id, slot, file.file_name, file.data)?);
        }
        Ok(queue)
    }
}
