//! The editable form behind the admin surface.

use folio_core::project::{Category, Journal, Project};
use folio_storage::path::project_folder;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ManagerError;

/// Message shown when a save is attempted without an id.
pub const ID_REQUIRED: &str = "Project ID is required!";

/// Message shown when the id cannot name a media folder.
pub const ID_UNSAFE: &str = "Project ID cannot contain '/', '\\', '.' or '..' segments!";

/// Form fields of a project under edit.
///
/// Tags and authors are not part of the draft: they are collected in the
/// session's lists and passed in when the record is assembled. The media
/// fields hold the URLs of the record being edited and are kept when a save
/// uploads nothing new.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProjectDraft {
    #[validate(
        length(min = 1, message = "Project ID is required!"),
        custom(function = "media_safe_id")
    )]
    pub id: String,
    /// Free text, coerced to a [`Category`] on save.
    pub category: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub journal: Journal,
    pub award: String,
    pub url: String,
    pub source_url: String,
    pub target_url: String,
    pub main_image: Option<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub movie: Option<String>,
}

/// A single-valued form field, addressed by [`crate::AdminAction::SetField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Id,
    Category,
    Title,
    Subtitle,
    Description,
    Location,
    Date,
    JournalName,
    JournalVolume,
    JournalNumber,
    JournalPages,
    Award,
    Url,
    SourceUrl,
    TargetUrl,
}

impl ProjectDraft {
    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Id => &mut self.id,
            DraftField::Category => &mut self.category,
            DraftField::Title => &mut self.title,
            DraftField::Subtitle => &mut self.subtitle,
            DraftField::Description => &mut self.description,
            DraftField::Location => &mut self.location,
            DraftField::Date => &mut self.date,
            DraftField::JournalName => &mut self.journal.name,
            DraftField::JournalVolume => &mut self.journal.volume,
            DraftField::JournalNumber => &mut self.journal.number,
            DraftField::JournalPages => &mut self.journal.pages,
            DraftField::Award => &mut self.award,
            DraftField::Url => &mut self.url,
            DraftField::SourceUrl => &mut self.source_url,
            DraftField::TargetUrl => &mut self.target_url,
        };
        *slot = value;
    }

    /// Run field validation, returning the first message on failure.
    pub fn check(&self) -> Result<(), ManagerError> {
        self.validate()
            .map_err(|errors| ManagerError::Validation(first_message(&errors)))
    }

    /// Build the record to persist. `types` and `authors` replace whatever
    /// the draft was loaded from.
    pub fn to_project(&self, types: &[String], authors: &[String]) -> Project {
        Project {
            id: self.id.clone(),
            category: Category::from_text(&self.category),
            types: types.to_vec(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date.clone(),
            journal: self.journal.clone(),
            authors: authors.to_vec(),
            award: self.award.clone(),
            url: self.url.clone(),
            source_url: self.source_url.clone(),
            target_url: self.target_url.clone(),
            main_image: self.main_image.clone(),
            images: self.images.clone(),
            videos: self.videos.clone(),
            movie: self.movie.clone(),
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            category: project.category.as_str().to_string(),
            title: project.title.clone(),
            subtitle: project.subtitle.clone(),
            description: project.description.clone(),
            location: project.location.clone(),
            date: project.date.clone(),
            journal: project.journal.clone(),
            award: project.award.clone(),
            url: project.url.clone(),
            source_url: project.source_url.clone(),
            target_url: project.target_url.clone(),
            main_image: project.main_image.clone(),
            images: project.images.clone(),
            videos: project.videos.clone(),
            movie: project.movie.clone(),
        }
    }
}

/// The id doubles as the `projects/{id}` media folder, so it must be a
/// single path segment. Empty ids are left to the length rule.
fn media_safe_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || project_folder(id).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("media_safe_id").with_message(ID_UNSAFE.into()))
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_id_is_rejected_with_form_message() {
        let draft = ProjectDraft::default();
        assert_matches!(draft.check(), Err(ManagerError::Validation(msg)) if msg == ID_REQUIRED);

        let draft = ProjectDraft {
            id: "demo".into(),
            ..Default::default()
        };
        assert!(draft.check().is_ok());
    }

    #[test]
    fn ids_that_cannot_name_a_folder_are_rejected() {
        for id in ["a/b", "..", ".", "/", "a\\b"] {
            let draft = ProjectDraft {
                id: id.into(),
                ..Default::default()
            };
            assert_matches!(
                draft.check(),
                Err(ManagerError::Validation(msg)) if msg == ID_UNSAFE,
                "id {id:?}"
            );
        }

        let draft = ProjectDraft {
            id: "paper-2024 v2".into(),
            ..Default::default()
        };
        assert!(draft.check().is_ok());
    }

    #[test]
    fn to_project_coerces_category_and_takes_lists() {
        let mut draft = ProjectDraft::default();
        draft.set(DraftField::Id, "demo".into());
        draft.set(DraftField::Category, "Academic Paper".into());
        draft.set(DraftField::JournalPages, "1-9".into());

        let project = draft.to_project(&["Oral".into()], &["A. Author".into()]);
        assert_eq!(project.category, Category::Academic);
        assert_eq!(project.types, vec!["Oral"]);
        assert_eq!(project.authors, vec!["A. Author"]);
        assert_eq!(project.journal.pages, "1-9");
    }

    #[test]
    fn loads_from_project_including_media() {
        let project = Project {
            id: "demo".into(),
            category: Category::Product,
            main_image: Some("https://cdn/main".into()),
            images: vec!["https://cdn/a".into()],
            ..Default::default()
        };
        let draft = ProjectDraft::from(&project);
        assert_eq!(draft.category, "product");
        assert_eq!(draft.main_image.as_deref(), Some("https://cdn/main"));
        assert_eq!(draft.to_project(&[], &[]).images, project.images);
    }
}
