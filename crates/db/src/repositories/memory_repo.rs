//! In-process store holding raw JSON documents.
//!
//! Documents are kept in their stored shape rather than as [`Project`]
//! values so that reads go through the same coercion as the PostgreSQL
//! store. Seed it with [`MemoryProjectStore::insert_raw`] to simulate
//! legacy documents.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::project::Project;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::store::{decode_all, ensure_id, ProjectStore};

#[derive(Debug, Default, Clone)]
pub struct MemoryProjectStore {
    documents: Arc<RwLock<BTreeMap<String, serde_json::Value>>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document exactly as given, bypassing validation.
    pub async fn insert_raw(&self, id: impl Into<String>, document: serde_json::Value) {
        self.documents.write().await.insert(id.into(), document);
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn list(&self) -> Result<Vec<Project>, DbError> {
        let rows = self
            .documents
            .read()
            .await
            .iter()
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect();
        Ok(decode_all(rows))
    }

    async fn get(&self, id: &str) -> Result<Option<Project>, DbError> {
        let doc = self.documents.read().await.get(id).cloned();
        match doc {
            Some(doc) => Ok(Some(Project::from_document(id, doc)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, project: &Project) -> Result<(), DbError> {
        ensure_id(project)?;
        self.documents
            .write()
            .await
            .insert(project.id.clone(), project.to_document());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        Ok(self.documents.write().await.remove(id).is_some())
    }

    async fn health_check(&self) -> Result<(), DbError> {
        Ok(())
    }
}
