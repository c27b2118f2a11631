//! Project media storage.
//!
//! - [`MediaStore`] -- object storage contract (upload with progress,
//!   download URL, delete, one-level listing).
//! - [`backends`] -- local filesystem, S3 and in-memory implementations.
//! - [`UploadQueue`] -- ordered single-worker upload of a batch of files.
//! - [`delete_tree`] -- depth-first removal of a whole media folder.
//! - [`ProgressTracker`] -- per-file upload progress published over a
//!   `tokio::sync::watch` channel.

pub mod backends;
pub mod error;
pub mod path;
pub mod progress;
pub mod queue;
pub mod store;
pub mod tree;

pub use backends::{LocalMediaStore, MemoryMediaStore, S3MediaStore};
pub use error::StorageError;
pub use path::{MediaSlot, ObjectPath};
pub use progress::{FileProgress, ProgressTracker};
pub use queue::{CompletedUpload, UploadFailure, UploadQueue, UploadTask};
pub use store::{Listing, MediaStore, ProgressFn};
pub use tree::{delete_tree, DeleteReport};
