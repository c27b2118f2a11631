//! Object paths and the per-project media layout.
//!
//! ```text
//! projects/{id}/main_image
//! projects/{id}/images/{file_name}
//! projects/{id}/videos/{file_name}
//! ```

use std::fmt;

use folio_core::project::media_folder;
use serde::Serialize;

use crate::error::StorageError;

/// A validated `/`-separated object key without leading or trailing slash.
///
/// Segments may not be empty, `.` or `..`, and backslashes are rejected, so
/// a path can never escape the store root of a filesystem backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectPath(String);

impl ObjectPath {
    pub fn new(path: impl AsRef<str>) -> Result<Self, StorageError> {
        let raw = path.as_ref();
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() || trimmed.contains('\\') {
            return Err(StorageError::InvalidPath(raw.to_string()));
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(StorageError::InvalidPath(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Append a single path segment.
    pub fn child(&self, segment: &str) -> Result<Self, StorageError> {
        check_segment(segment)?;
        Ok(Self(format!("{}/{segment}", self.0)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment, e.g. the file name.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Number of `/`-separated segments.
    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// Whether `self` is `other` or lies beneath it.
    pub fn starts_with(&self, other: &ObjectPath) -> bool {
        self.0 == other.0
            || self
                .0
                .strip_prefix(other.0.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_segment(segment: &str) -> Result<(), StorageError> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains('/')
        || segment.contains('\\')
    {
        return Err(StorageError::InvalidPath(segment.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Project media layout
// ---------------------------------------------------------------------------

/// Which field of a project an uploaded file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    MainImage,
    Image,
    Video,
}

impl MediaSlot {
    /// Storage key for a file in this slot.
    ///
    /// The main image has a fixed key, so re-uploading it replaces the
    /// previous object. Images and videos are keyed by file name.
    pub fn object_path(self, project_id: &str, file_name: &str) -> Result<ObjectPath, StorageError> {
        let folder = project_folder(project_id)?;
        match self {
            Self::MainImage => folder.child("main_image"),
            Self::Image => folder.child("images")?.child(file_name),
            Self::Video => folder.child("videos")?.child(file_name),
        }
    }
}

/// `projects/{id}` as an object path.
pub fn project_folder(project_id: &str) -> Result<ObjectPath, StorageError> {
    check_segment(project_id)?;
    ObjectPath::new(media_folder(project_id))
}
