//! Admin surface for creating, editing and deleting projects.
//!
//! [`AdminState`] is the explicit state of one admin session, changed by
//! [`AdminState::apply`] for form edits and by [`ProjectManager`] for the
//! operations that touch the stores. The stateless `*_project` methods on
//! [`ProjectManager`] are what the HTTP layer calls.

pub mod draft;
pub mod error;
pub mod manager;
pub mod media;
pub mod state;

pub use draft::{DraftField, ProjectDraft};
pub use error::ManagerError;
pub use manager::{DeleteOutcome, ProjectManager};
pub use media::{MediaFile, PendingMedia};
pub use state::{AdminAction, AdminState, Notice, Phase};
