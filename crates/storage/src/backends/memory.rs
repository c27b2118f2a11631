//! In-process object store for development and tests.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::path::ObjectPath;
use crate::store::{public_url, Listing, MediaStore, ProgressFn};

/// Progress is reported once per chunk of this many bytes.
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Default)]
struct Inner {
    objects: BTreeMap<String, Bytes>,
    uploads: Vec<String>,
    deletes: Vec<String>,
    failing: HashSet<String>,
}

/// Objects held in a map keyed by path. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct MemoryMediaStore {
    base_url: String,
    inner: Arc<RwLock<Inner>>,
}

impl MemoryMediaStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            inner: Arc::default(),
        }
    }

    /// Make every upload to `path` fail with a backend error.
    pub async fn fail_uploads_to(&self, path: &str) {
        self.inner.write().await.failing.insert(path.to_string());
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.inner.read().await.objects.contains_key(path)
    }

    pub async fn object(&self, path: &str) -> Option<Bytes> {
        self.inner.read().await.objects.get(path).cloned()
    }

    /// Paths uploaded so far, in call order.
    pub async fn upload_log(&self) -> Vec<String> {
        self.inner.read().await.uploads.clone()
    }

    /// Paths deleted so far, in call order.
    pub async fn delete_log(&self) -> Vec<String> {
        self.inner.read().await.deletes.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.objects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.objects.is_empty()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(
        &self,
        path: &ObjectPath,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<ObjectPath, StorageError> {
        if self.inner.read().await.failing.contains(path.as_str()) {
            return Err(StorageError::Backend(format!("upload to {path} rejected")));
        }

        let total = data.len() as u64;
        on_progress(0, total);
        let mut sent = 0usize;
        while sent < data.len() {
            sent = (sent + CHUNK_SIZE).min(data.len());
            on_progress(sent as u64, total);
        }

        let mut inner = self.inner.write().await;
        inner.uploads.push(path.to_string());
        inner.objects.insert(path.to_string(), data);
        Ok(path.clone())
    }

    async fn download_url(&self, object: &ObjectPath) -> Result<String, StorageError> {
        if !self.contains(object.as_str()).await {
            return Err(StorageError::NotFound(object.to_string()));
        }
        Ok(public_url(&self.base_url, object))
    }

    async fn delete(&self, object: &ObjectPath) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.objects.remove(object.as_str()).is_none() {
            return Err(StorageError::NotFound(object.to_string()));
        }
        inner.deletes.push(object.to_string());
        Ok(())
    }

    async fn list(&self, prefix: &ObjectPath) -> Result<Listing, StorageError> {
        let folder = format!("{prefix}/");
        let inner = self.inner.read().await;

        let mut items = Vec::new();
        let mut prefixes = BTreeSet::new();
        for key in inner.objects.keys() {
            let Some(rest) = key.strip_prefix(&folder) else {
                continue;
            };
            match rest.split_once('/') {
                None => items.push(ObjectPath::new(key)?),
                Some((dir, _)) => {
                    prefixes.insert(dir.to_string());
                }
            }
        }

        let prefixes = prefixes
            .into_iter()
            .map(|dir| prefix.child(&dir))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Listing { items, prefixes })
    }
}
