//! Filesystem object store.
//!
//! Objects are files under a root directory; folders are directories.
//! Empty directories are pruned after a delete so folders stay virtual, as
//! they are on a hosted bucket. Files are expected to be served at
//! `{public_base_url}/{path}` by a static file server or CDN.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;
use crate::path::ObjectPath;
use crate::store::{public_url, Listing, MediaStore, ProgressFn};

/// Bytes written between progress reports.
const CHUNK_SIZE: usize = 256 * 1024;

#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn fs_path(&self, object: &ObjectPath) -> PathBuf {
        object
            .as_str()
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Remove now-empty directories between `dir` and the root.
    async fn prune_empty_parents(&self, mut dir: Option<&Path>) {
        while let Some(current) = dir {
            if current == self.root || !current.starts_with(&self.root) {
                break;
            }
            // Fails on non-empty directories, which ends the walk.
            if fs::remove_dir(current).await.is_err() {
                break;
            }
            dir = current.parent();
        }
    }
}

fn not_found_or_io(object: &ObjectPath, e: std::io::Error) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::NotFound(object.to_string())
    } else {
        StorageError::Io(e)
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(
        &self,
        path: &ObjectPath,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<ObjectPath, StorageError> {
        let target = self.fs_path(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let total = data.len() as u64;
        on_progress(0, total);

        let mut file = fs::File::create(&target).await?;
        let mut written = 0u64;
        for chunk in data.chunks(CHUNK_SIZE) {
            file.write_all(chunk).await?;
            written += chunk.len() as u64;
            on_progress(written, total);
        }
        file.flush().await?;
        file.sync_all().await?;

        tracing::debug!(path = %path, bytes = total, "Stored media file");
        Ok(path.clone())
    }

    async fn download_url(&self, object: &ObjectPath) -> Result<String, StorageError> {
        let meta = fs::metadata(self.fs_path(object))
            .await
            .map_err(|e| not_found_or_io(object, e))?;
        if !meta.is_file() {
            return Err(StorageError::NotFound(object.to_string()));
        }
        Ok(public_url(&self.public_base_url, object))
    }

    async fn delete(&self, object: &ObjectPath) -> Result<(), StorageError> {
        let target = self.fs_path(object);
        fs::remove_file(&target)
            .await
            .map_err(|e| not_found_or_io(object, e))?;
        self.prune_empty_parents(target.parent()).await;
        Ok(())
    }

    async fn list(&self, prefix: &ObjectPath) -> Result<Listing, StorageError> {
        let dir = self.fs_path(prefix);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Listing::default()),
            Err(e) => return Err(e.into()),
        };

        let mut listing = Listing::default();
        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(entry = ?entry.path(), "Skipping non UTF-8 media entry");
                continue;
            };
            let child = prefix.child(&name)?;
            if entry.file_type().await?.is_dir() {
                listing.prefixes.push(child);
            } else {
                listing.items.push(child);
            }
        }
        listing.items.sort();
        listing.prefixes.sort();
        Ok(listing)
    }
}
