//! Recursive removal of a media folder.
//!
//! The walk keeps an explicit stack of folders instead of recursing, so
//! arbitrarily deep trees cannot overflow the async call stack. Folders are
//! visited depth-first in listing order: a folder's own objects are deleted
//! one at a time before any of its sub-folders are entered.

use crate::error::StorageError;
use crate::path::ObjectPath;
use crate::store::MediaStore;

/// What [`delete_tree`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Deleted objects in deletion order.
    pub deleted: Vec<ObjectPath>,
    /// Folders listed, including the root.
    pub folders: usize,
    /// Deepest folder level reached below the root (root is 0).
    pub max_depth: usize,
}

/// Delete every object beneath `root`.
///
/// A root that does not exist is not an error and yields an empty report.
/// The first storage failure aborts the walk; objects deleted before it are
/// gone.
pub async fn delete_tree(
    store: &dyn MediaStore,
    root: &ObjectPath,
) -> Result<DeleteReport, StorageError> {
    let mut report = DeleteReport::default();
    let mut stack = vec![(root.clone(), 0usize)];

    while let Some((folder, depth)) = stack.pop() {
        let listing = store.list(&folder).await?;
        report.folders += 1;
        report.max_depth = report.max_depth.max(depth);

        for item in listing.items {
            store.delete(&item).await?;
            tracing::debug!(object = %item, "Deleted media object");
            report.deleted.push(item);
        }

        // Reverse so the first sub-folder is popped next.
        stack.extend(listing.prefixes.into_iter().rev().map(|p| (p, depth + 1)));
    }

    tracing::info!(
        root = %root,
        objects = report.deleted.len(),
        folders = report.folders,
        "Deleted media folder"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryMediaStore;
    use assert_matches::assert_matches;
    use bytes::Bytes;

    fn path(p: &str) -> ObjectPath {
        ObjectPath::new(p).unwrap()
    }

    async fn seed(store: &MemoryMediaStore, paths: &[&str]) {
        for p in paths {
            store
                .upload(&path(p), Bytes::from_static(b"x"), &|_, _| {})
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn deletes_every_object_once_depth_first() {
        let store = MemoryMediaStore::new("mem://");
        seed(
            &store,
            &[
                "projects/p/main_image",
                "projects/p/images/a.jpg",
                "projects/p/images/b.jpg",
                "projects/p/videos/v.mp4",
                "projects/other/main_image",
            ],
        )
        .await;

        let report = delete_tree(&store, &path("projects/p")).await.unwrap();

        assert_eq!(
            store.delete_log().await,
            vec![
                "projects/p/main_image",
                "projects/p/images/a.jpg",
                "projects/p/images/b.jpg",
                "projects/p/videos/v.mp4",
            ]
        );
        assert_eq!(report.deleted.len(), 4);
        assert_eq!(report.folders, 3);
        assert_eq!(report.max_depth, 1);
        assert!(store.contains("projects/other/main_image").await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn handles_deep_nesting() {
        let store = MemoryMediaStore::new("mem://");
        let deep: String = (0..200).map(|i| format!("/d{i}")).collect();
        let leaf = format!("projects/p{deep}/leaf");
        seed(&store, &[leaf.as_str()]).await;

        let report = delete_tree(&store, &path("projects/p")).await.unwrap();

        assert_eq!(report.deleted, vec![path(&leaf)]);
        assert_eq!(report.max_depth, 200);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn missing_folder_is_empty_report() {
        let store = MemoryMediaStore::new("mem://");
        let report = delete_tree(&store, &path("projects/none")).await.unwrap();
        assert_eq!(report.deleted, Vec::<ObjectPath>::new());
        assert_eq!(report.folders, 1);
    }

    #[tokio::test]
    async fn works_on_the_filesystem_backend() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::backends::LocalMediaStore::new(dir.path(), "http://x");
        for p in ["projects/p/main_image", "projects/p/images/a.jpg"] {
            store
                .upload(&path(p), Bytes::from_static(b"x"), &|_, _| {})
                .await
                .unwrap();
        }

        let report = delete_tree(&store, &path("projects/p")).await.unwrap();
        assert_eq!(report.deleted.len(), 2);
        assert!(!dir.path().join("projects/p").exists());
        assert_matches!(
            store.download_url(&path("projects/p/main_image")).await,
            Err(StorageError::NotFound(_))
        );
    }
}
