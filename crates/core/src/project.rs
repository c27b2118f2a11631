//! Project record schema and document coercion.
//!
//! Stored documents are loosely typed: older entries carry `type` and
//! `authors` as comma-separated strings, media lists may be `null`, and the
//! category is whatever was typed into the admin form. [`Project::from_document`]
//! coerces all of that into the explicit schema below so the rest of the
//! workspace never sees a missing or duck-typed field.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::ProjectId;

/// Storage key prefix shared by documents and media folders.
pub const PROJECTS_PREFIX: &str = "projects";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Top-level classification gating which form sections and detail fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Academic,
    Product,
    #[default]
    Unspecified,
}

impl Category {
    /// Coerce free text into a category.
    ///
    /// Matching is a case-insensitive substring test, `academic` first, so
    /// `"Academic paper"` is academic and `"product / demo"` is product.
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("academic") {
            Self::Academic
        } else if lower.contains("product") {
            Self::Product
        } else {
            Self::Unspecified
        }
    }

    /// Stored value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Product => "product",
            Self::Unspecified => "",
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient_string(deserializer)?;
        Ok(Category::from_text(&text))
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Publication venue details. Only meaningful for academic projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Journal {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub volume: String,
    #[serde(deserialize_with = "lenient_string")]
    pub number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pages: String,
}

/// One persisted project entity keyed by its id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub id: ProjectId,
    pub category: Category,
    /// Presentation tags in display order.
    #[serde(rename = "type", deserialize_with = "string_or_list")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub subtitle: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    /// Raw date as entered. See [`crate::date::normalize_date`].
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_journal")]
    pub journal: Journal,
    #[serde(deserialize_with = "string_or_list")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub award: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(rename = "sourceUrl", deserialize_with = "lenient_string")]
    pub source_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "optional_url")]
    pub main_image: Option<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub videos: Vec<String>,
    /// Legacy single-video field from early documents. Read by the slider only.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "optional_url")]
    pub movie: Option<String>,
}

impl Project {
    /// Coerce a stored document into a record.
    ///
    /// `id` is the document key and always wins over any `id` field inside
    /// the document body.
    pub fn from_document(id: &str, document: serde_json::Value) -> Result<Self, CoreError> {
        if !document.is_object() {
            return Err(CoreError::Validation(format!(
                "Project document '{id}' is not an object"
            )));
        }
        let mut project: Project = serde_json::from_value(document).map_err(|e| {
            CoreError::Validation(format!("Project document '{id}' could not be decoded: {e}"))
        })?;
        project.id = id.to_string();
        Ok(project)
    }

    /// Serialize into the stored document shape.
    pub fn to_document(&self) -> serde_json::Value {
        // Plain strings, vectors and maps only; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Storage folder holding every media object of this project.
    pub fn media_folder(&self) -> String {
        media_folder(&self.id)
    }
}

/// `projects/{id}`
pub fn media_folder(id: &str) -> String {
    format!("{PROJECTS_PREFIX}/{id}")
}

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Many(Vec<Option<Loose>>),
    Number(serde_json::Number),
    Flag(bool),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Loose::Text(s) => s,
            Loose::Number(n) => n.to_string(),
            Loose::Flag(b) => b.to_string(),
            Loose::Many(items) => items
                .into_iter()
                .flatten()
                .map(Loose::into_text)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn into_list(self) -> Vec<String> {
        match self {
            Loose::Text(s) => split_list(&s),
            Loose::Many(items) => items
                .into_iter()
                .flatten()
                .map(Loose::into_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            other => split_list(&other.into_text()),
        }
    }
}

/// Split a comma-delimited scratch value into trimmed, non-empty entries.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_text)
        .unwrap_or_default())
}

fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_list)
        .unwrap_or_default())
}

fn optional_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let text = lenient_string(deserializer)?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn lenient_journal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Journal, D::Error> {
    Ok(Option::<Journal>::deserialize(deserializer)?.unwrap_or_default())
}
