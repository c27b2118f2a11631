//! Admin session state and its reducer.

use std::fmt;

use folio_core::gate::check_secret;
use folio_core::project::Project;

use crate::draft::{DraftField, ProjectDraft};

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The admin secret has not been entered yet.
    #[default]
    Locked,
    Idle,
    Saving,
    Deleting,
}

/// The last user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    IncorrectSecret,
    /// A save was refused before anything was written.
    Rejected(String),
    Saved { id: String, updated: bool },
    Deleted { id: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncorrectSecret => f.write_str("Incorrect password!"),
            Self::Rejected(message) => f.write_str(message),
            Self::Saved { updated: true, .. } => f.write_str("Project updated successfully!"),
            Self::Saved { updated: false, .. } => f.write_str("Project added successfully!"),
            Self::Deleted { .. } => f.write_str("Project deleted successfully!"),
        }
    }
}

/// Form-level changes handled by [`AdminState::apply`].
#[derive(Debug, Clone)]
pub enum AdminAction {
    Unlock(String),
    SetField(DraftField, String),
    AddType(String),
    RemoveType(String),
    AddAuthor(String),
    RemoveAuthor(String),
    /// Load an existing record into the form.
    Edit(Project),
    /// Clear the form and leave edit mode.
    Reset,
}

/// State of one admin session.
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub(crate) phase: Phase,
    pub(crate) draft: ProjectDraft,
    pub(crate) editing: bool,
    pub(crate) types: Vec<String>,
    pub(crate) authors: Vec<String>,
    pub(crate) projects: Vec<Project>,
    pub(crate) notice: Option<Notice>,
}

impl AdminState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Projects as of the last successful refresh.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Apply a form action. Everything except `Unlock` is ignored while the
    /// session is locked.
    pub fn apply(&mut self, action: AdminAction) {
        if self.phase == Phase::Locked {
            match action {
                AdminAction::Unlock(secret) => {
                    if check_secret(&secret) {
                        self.phase = Phase::Idle;
                        self.notice = None;
                    } else {
                        self.notice = Some(Notice::IncorrectSecret);
                    }
                }
                other => tracing::debug!(action = ?other, "Ignoring action on locked admin session"),
            }
            return;
        }

        match action {
            AdminAction::Unlock(_) => {}
            // The id is the storage key of the record under edit.
            AdminAction::SetField(DraftField::Id, _) if self.editing => {}
            AdminAction::SetField(field, value) => self.draft.set(field, value),
            AdminAction::AddType(tag) => push_unique(&mut self.types, &tag),
            AdminAction::RemoveType(tag) => self.types.retain(|t| *t != tag),
            AdminAction::AddAuthor(name) => push_unique(&mut self.authors, &name),
            AdminAction::RemoveAuthor(name) => self.authors.retain(|a| *a != name),
            AdminAction::Edit(project) => {
                self.draft = ProjectDraft::from(&project);
                self.types = project.types;
                self.authors = project.authors;
                self.editing = true;
            }
            AdminAction::Reset => self.reset_form(),
        }
    }

    pub(crate) fn reset_form(&mut self) {
        self.draft = ProjectDraft::default();
        self.types.clear();
        self.authors.clear();
        self.editing = false;
    }
}

/// Append the trimmed value unless it is blank or already present.
fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
