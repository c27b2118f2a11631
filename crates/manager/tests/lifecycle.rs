//! Save/delete orchestration against recording stores.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;
use bytes::Bytes;
use folio_core::error::CoreError;
use folio_core::gate::ADMIN_SECRET;
use folio_core::project::Project;
use folio_db::{DbError, MemoryProjectStore, ProjectStore};
use folio_manager::draft::ID_UNSAFE;
use folio_manager::{
    AdminAction, AdminState, DraftField, ManagerError, MediaFile, Notice, PendingMedia, Phase,
    ProjectDraft, ProjectManager,
};
use folio_storage::{Listing, MediaStore, MemoryMediaStore, ObjectPath, ProgressFn, StorageError};

// ---------------------------------------------------------------------------
// Recording stores
// ---------------------------------------------------------------------------

type CallLog = Arc<Mutex<Vec<String>>>;

fn record(log: &CallLog, entry: String) {
    log.lock().unwrap().push(entry);
}

struct RecordingProjects {
    inner: MemoryProjectStore,
    log: CallLog,
    fail_delete: bool,
    fail_list: bool,
}

#[async_trait]
impl ProjectStore for RecordingProjects {
    async fn list(&self) -> Result<Vec<Project>, DbError> {
        record(&self.log, "doc.list".into());
        if self.fail_list {
            return Err(CoreError::Internal("list unavailable".into()).into());
        }
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> Result<Option<Project>, DbError> {
        self.inner.get(id).await
    }

    async fn put(&self, project: &Project) -> Result<(), DbError> {
        record(&self.log, format!("doc.put:{}", project.id));
        self.inner.put(project).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        record(&self.log, format!("doc.delete:{id}"));
        if self.fail_delete {
            return Err(CoreError::Internal("delete refused".into()).into());
        }
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> Result<(), DbError> {
        Ok(())
    }
}

struct RecordingMedia {
    inner: MemoryMediaStore,
    log: CallLog,
}

#[async_trait]
impl MediaStore for RecordingMedia {
    async fn upload(
        &self,
        path: &ObjectPath,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<ObjectPath, StorageError> {
        record(&self.log, format!("media.upload:{path}"));
        self.inner.upload(path, data, on_progress).await
    }

    async fn download_url(&self, object: &ObjectPath) -> Result<String, StorageError> {
        self.inner.download_url(object).await
    }

    async fn delete(&self, object: &ObjectPath) -> Result<(), StorageError> {
        record(&self.log, format!("media.delete:{object}"));
        self.inner.delete(object).await
    }

    async fn list(&self, prefix: &ObjectPath) -> Result<Listing, StorageError> {
        record(&self.log, format!("media.list:{prefix}"));
        self.inner.list(prefix).await
    }
}

struct Harness {
    manager: ProjectManager,
    docs: MemoryProjectStore,
    media: MemoryMediaStore,
    log: CallLog,
}

impl Harness {
    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

fn harness_with(fail_delete: bool, fail_list: bool) -> Harness {
    let log = CallLog::default();
    let docs = MemoryProjectStore::new();
    let media = MemoryMediaStore::new("https://cdn.test");
    let manager = ProjectManager::new(
        Arc::new(RecordingProjects {
            inner: docs.clone(),
            log: log.clone(),
            fail_delete,
            fail_list,
        }),
        Arc::new(RecordingMedia {
            inner: media.clone(),
            log: log.clone(),
        }),
    );
    Harness {
        manager,
        docs,
        media,
        log,
    }
}

fn harness() -> Harness {
    harness_with(false, false)
}

fn unlocked_with_id(id: &str) -> AdminState {
    let mut state = AdminState::new();
    state.apply(AdminAction::Unlock(ADMIN_SECRET.into()));
    state.apply(AdminAction::SetField(DraftField::Id, id.into()));
    state
}

fn file(name: &str) -> MediaFile {
    MediaFile::new(name, Bytes::from(name.as_bytes().to_vec()))
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_without_id_is_rejected_without_writes() {
    let h = harness();
    let mut state = AdminState::new();
    state.apply(AdminAction::Unlock(ADMIN_SECRET.into()));

    let media = PendingMedia {
        main_image: Some(file("cover.png")),
        ..Default::default()
    };
    let saved = h.manager.save(&mut state, media).await.unwrap();

    assert_eq!(saved, None);
    assert_eq!(state.notice(), Some(&Notice::Rejected("Project ID is required!".into())));
    assert!(h.calls().is_empty());
    assert!(h.media.is_empty().await);
}

#[tokio::test]
async fn save_rejects_ids_that_cannot_name_a_media_folder() {
    let h = harness();
    for id in ["a/b", ".."] {
        let draft = ProjectDraft {
            id: id.into(),
            ..Default::default()
        };
        let result = h
            .manager
            .save_project(&draft, &[], &[], PendingMedia::default())
            .await;
        assert_matches!(result, Err(ManagerError::Validation(msg)) if msg == ID_UNSAFE);

        let mut state = unlocked_with_id(id);
        let saved = h.manager.save(&mut state, PendingMedia::default()).await.unwrap();
        assert_eq!(saved, None);
        assert_eq!(state.notice(), Some(&Notice::Rejected(ID_UNSAFE.into())));
    }
    assert!(h.calls().is_empty());
    assert!(h.docs.is_empty().await);
}

#[tokio::test]
async fn saved_ids_are_always_deletable() {
    let h = harness();
    let draft = ProjectDraft {
        id: "paper 2024".into(),
        ..Default::default()
    };
    h.manager
        .save_project(&draft, &[], &[], PendingMedia::default())
        .await
        .unwrap();

    let outcome = h.manager.delete_project("paper 2024").await.unwrap();

    assert!(outcome.existed);
    assert!(h.docs.is_empty().await);
}

#[tokio::test]
async fn save_uploads_in_order_then_writes_document() {
    let h = harness();
    let mut state = unlocked_with_id("demo");
    state.apply(AdminAction::SetField(DraftField::Title, "Demo".into()));
    state.apply(AdminAction::AddType("Oral".into()));
    state.apply(AdminAction::AddAuthor("A. Author".into()));

    let media = PendingMedia {
        main_image: Some(file("cover.png")),
        images: vec![file("1.jpg"), file("2.jpg")],
        videos: vec![file("clip.mp4")],
    };
    let saved = h.manager.save(&mut state, media).await.unwrap().unwrap();

    assert_eq!(
        h.calls(),
        vec![
            "media.upload:projects/demo/main_image",
            "media.upload:projects/demo/images/1.jpg",
            "media.upload:projects/demo/images/2.jpg",
            "media.upload:projects/demo/videos/clip.mp4",
            "doc.put:demo",
            "doc.list",
        ]
    );
    assert_eq!(saved.main_image.as_deref(), Some("https://cdn.test/projects/demo/main_image"));
    assert_eq!(
        saved.images,
        vec![
            "https://cdn.test/projects/demo/images/1.jpg",
            "https://cdn.test/projects/demo/images/2.jpg",
        ]
    );
    assert_eq!(saved.videos, vec!["https://cdn.test/projects/demo/videos/clip.mp4"]);
    assert_eq!(saved.types, vec!["Oral"]);
    assert_eq!(saved.authors, vec!["A. Author"]);

    // Form reset, list reloaded, notice raised.
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.draft(), &ProjectDraft::default());
    assert!(state.types().is_empty());
    assert_eq!(state.projects().len(), 1);
    assert_eq!(state.notice().map(ToString::to_string).as_deref(), Some("Project added successfully!"));

    let progress = h.manager.progress().snapshot();
    assert_eq!(progress.len(), 4);
    assert!(progress.iter().all(|p| p.percent == 100));
}

#[tokio::test]
async fn edit_without_new_media_keeps_previous_media() {
    let h = harness();
    let existing = Project {
        id: "demo".into(),
        title: "Old".into(),
        types: vec!["Demo".into()],
        main_image: Some("https://cdn.test/projects/demo/main_image".into()),
        images: vec!["https://cdn.test/projects/demo/images/a.jpg".into()],
        videos: vec!["https://cdn.test/projects/demo/videos/v.mp4".into()],
        ..Default::default()
    };
    h.docs.put(&existing).await.unwrap();

    let mut state = AdminState::new();
    state.apply(AdminAction::Unlock(ADMIN_SECRET.into()));
    state.apply(AdminAction::Edit(existing.clone()));
    state.apply(AdminAction::SetField(DraftField::Title, "New".into()));

    let saved = h
        .manager
        .save(&mut state, PendingMedia::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(saved.title, "New");
    assert_eq!(saved.main_image, existing.main_image);
    assert_eq!(saved.images, existing.images);
    assert_eq!(saved.videos, existing.videos);
    assert_eq!(saved.types, existing.types);
    assert_eq!(state.notice().map(ToString::to_string).as_deref(), Some("Project updated successfully!"));
    assert!(!state.is_editing());
}

#[tokio::test]
async fn new_images_replace_previous_images_only() {
    let h = harness();
    let existing = Project {
        id: "demo".into(),
        images: vec!["https://old/a.jpg".into()],
        videos: vec!["https://old/v.mp4".into()],
        ..Default::default()
    };
    let mut state = AdminState::new();
    state.apply(AdminAction::Unlock(ADMIN_SECRET.into()));
    state.apply(AdminAction::Edit(existing));

    let media = PendingMedia {
        images: vec![file("b.jpg")],
        ..Default::default()
    };
    let saved = h.manager.save(&mut state, media).await.unwrap().unwrap();

    assert_eq!(saved.images, vec!["https://cdn.test/projects/demo/images/b.jpg"]);
    assert_eq!(saved.videos, vec!["https://old/v.mp4"]);
    assert_eq!(saved.main_image, None);
}

#[tokio::test]
async fn progress_reflects_only_the_latest_batch() {
    let h = harness();
    for (id, name) in [("first", "a.jpg"), ("second", "b.jpg")] {
        let draft = ProjectDraft {
            id: id.into(),
            ..Default::default()
        };
        let media = PendingMedia {
            images: vec![file(name)],
            ..Default::default()
        };
        h.manager.save_project(&draft, &[], &[], media).await.unwrap();
    }

    let progress = h.manager.progress().snapshot();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].name, "b.jpg");
    assert_eq!(progress[0].percent, 100);
}

#[tokio::test]
async fn upload_failure_aborts_save_and_keeps_orphans() {
    let h = harness();
    h.media.fail_uploads_to("projects/demo/images/2.jpg").await;
    let mut state = unlocked_with_id("demo");

    let media = PendingMedia {
        images: vec![file("1.jpg"), file("2.jpg"), file("3.jpg")],
        ..Default::default()
    };
    let err = h.manager.save(&mut state, media).await.unwrap_err();

    assert_matches!(&err, ManagerError::Upload(failure) if failure.file_name == "2.jpg" && failure.completed.len() == 1);
    assert!(h.media.contains("projects/demo/images/1.jpg").await);
    assert!(!h.media.contains("projects/demo/images/3.jpg").await);
    assert!(h.docs.is_empty().await);
    assert!(!h.calls().iter().any(|c| c.starts_with("doc.")));

    // The draft survives so the admin can retry.
    assert_eq!(state.draft().id, "demo");
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn locked_session_cannot_save() {
    let h = harness();
    let mut state = AdminState::new();
    let result = h.manager.save(&mut state, PendingMedia::default()).await;
    assert_matches!(result, Err(ManagerError::Locked));
    assert!(h.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

async fn seed_demo(h: &Harness) {
    h.docs
        .put(&Project {
            id: "demo".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    for p in [
        "projects/demo/main_image",
        "projects/demo/images/a.jpg",
        "projects/demo/images/b.jpg",
        "projects/demo/videos/v.mp4",
        "projects/keep/main_image",
    ] {
        h.media
            .upload(&ObjectPath::new(p).unwrap(), Bytes::from_static(b"x"), &|_, _| {})
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn delete_removes_document_before_media_depth_first() {
    let h = harness();
    seed_demo(&h).await;
    let mut state = unlocked_with_id("ignored");

    let outcome = h.manager.delete(&mut state, "demo").await.unwrap();

    assert!(outcome.existed);
    assert_eq!(
        h.calls(),
        vec![
            "doc.delete:demo",
            "media.list:projects/demo",
            "media.delete:projects/demo/main_image",
            "media.list:projects/demo/images",
            "media.delete:projects/demo/images/a.jpg",
            "media.delete:projects/demo/images/b.jpg",
            "media.list:projects/demo/videos",
            "media.delete:projects/demo/videos/v.mp4",
            "doc.list",
        ]
    );
    assert_eq!(outcome.media.deleted.len(), 4);
    assert_eq!(h.media.len().await, 1);
    assert!(state.projects().is_empty());
    assert_eq!(state.notice(), Some(&Notice::Deleted { id: "demo".into() }));
}

#[tokio::test]
async fn failed_document_delete_leaves_media_untouched() {
    let h = harness_with(true, false);
    seed_demo(&h).await;
    let mut state = unlocked_with_id("ignored");

    let result = h.manager.delete(&mut state, "demo").await;

    assert_matches!(result, Err(ManagerError::Db(_)));
    assert_eq!(h.calls(), vec!["doc.delete:demo"]);
    assert_eq!(h.media.len().await, 5);
    assert_eq!(state.notice(), None);
}

#[tokio::test]
async fn delete_without_document_still_clears_media() {
    let h = harness();
    h.media
        .upload(
            &ObjectPath::new("projects/ghost/main_image").unwrap(),
            Bytes::from_static(b"x"),
            &|_, _| {},
        )
        .await
        .unwrap();

    let outcome = h.manager.delete_project("ghost").await.unwrap();

    assert!(!outcome.existed);
    assert_eq!(outcome.media.deleted.len(), 1);
    assert!(h.media.is_empty().await);
}

#[tokio::test]
async fn delete_rejects_unsafe_ids_before_any_call() {
    let h = harness();
    for id in ["", "..", "a/b"] {
        assert_matches!(h.manager.delete_project(id).await, Err(ManagerError::Storage(_)));
    }
    assert!(h.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_failure_keeps_cached_list() {
    let h = harness();
    seed_demo(&h).await;
    let mut state = unlocked_with_id("x");
    h.manager.refresh(&mut state).await;
    assert_eq!(state.projects().len(), 1);

    let failing = harness_with(false, true);
    failing.manager.refresh(&mut state).await;
    assert_eq!(state.projects().len(), 1);
    assert_eq!(failing.calls(), vec!["doc.list"]);
}
