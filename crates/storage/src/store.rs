//! The object storage contract.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;
use crate::path::ObjectPath;

/// Upload progress callback: `(bytes_transferred, total_bytes)`.
pub type ProgressFn<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// One level of a folder listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Objects directly inside the folder.
    pub items: Vec<ObjectPath>,
    /// Sub-folders directly inside the folder. Not expanded.
    pub prefixes: Vec<ObjectPath>,
}

/// Object storage for project media.
///
/// Folders are virtual: they exist only as long as some object lives
/// beneath them.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `data` at `path`, replacing any existing object, and call
    /// `on_progress` as bytes are transferred. Returns a reference to the
    /// stored object.
    async fn upload(
        &self,
        path: &ObjectPath,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<ObjectPath, StorageError>;

    /// Durable public URL for a stored object.
    async fn download_url(&self, object: &ObjectPath) -> Result<String, StorageError>;

    /// Remove one object.
    async fn delete(&self, object: &ObjectPath) -> Result<(), StorageError>;

    /// Objects and sub-folders directly under `prefix`. A folder that does
    /// not exist lists as empty.
    async fn list(&self, prefix: &ObjectPath) -> Result<Listing, StorageError>;
}

/// Join a public base URL and an object path.
///
/// Each segment is percent-encoded; the stored key stays raw.
pub(crate) fn public_url(base: &str, object: &ObjectPath) -> String {
    let encoded: Vec<_> = object
        .as_str()
        .split('/')
        .map(urlencoding::encode)
        .collect();
    format!("{}/{}", base.trim_end_matches('/'), encoded.join("/"))
}
