//! Gallery list pipeline: date normalization, newest-first ordering and
//! keyword/category filtering.
//!
//! Everything here is pure. Given the same records and query the output is
//! identical, so the HTTP layer can recompute the gallery on every request.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{normalize_date, DATE_FORMAT};
use crate::project::{Category, Project};

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// Category filter selected in the gallery toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    #[default]
    All,
    Academic,
    Product,
}

impl Criterion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Academic => "academic",
            Self::Product => "product",
        }
    }

    /// Whether a record of `category` passes this criterion.
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Academic => category == Category::Academic,
            Self::Product => category == Category::Product,
        }
    }
}

impl FromStr for Criterion {
    type Err = std::convert::Infallible;

    /// Unrecognized values select everything, like the "all" toolbar entry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "academic" => Self::Academic,
            "product" => Self::Product,
            _ => Self::All,
        })
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(text.parse().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Query / output
// ---------------------------------------------------------------------------

/// Gallery toolbar state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GalleryQuery {
    pub keyword: String,
    pub criterion: Criterion,
}

/// A project whose date passed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedProject {
    pub date: NaiveDate,
    pub project: Project,
}

impl DatedProject {
    /// Canonical `YYYY-MM-DD` rendering of [`Self::date`].
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Case-insensitive keyword match against title, subtitle and location.
    ///
    /// `needle` must already be lowercase. An empty needle matches everything.
    fn matches_keyword(&self, needle: &str) -> bool {
        let p = &self.project;
        [&p.title, &p.subtitle, &p.location]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Attach normalized dates, drop undated records, and order newest first.
///
/// The sort is stable, so records sharing a date keep their input order.
/// The record's `date` field is rewritten to its canonical form.
pub fn sort_projects(projects: Vec<Project>) -> Vec<DatedProject> {
    let mut dated: Vec<DatedProject> = projects
        .into_iter()
        .filter_map(|mut project| {
            let date = normalize_date(&project.date)?;
            project.date = date.format(DATE_FORMAT).to_string();
            Some(DatedProject { date, project })
        })
        .collect();

    dated.sort_by(|a, b| b.date.cmp(&a.date));
    dated
}

/// Apply the keyword and category filters to an already sorted list.
pub fn filter_projects<'a>(
    projects: &'a [DatedProject],
    keyword: &str,
    criterion: Criterion,
) -> Vec<&'a DatedProject> {
    let needle = keyword.to_lowercase();
    projects
        .iter()
        .filter(|p| p.matches_keyword(&needle) && criterion.admits(p.project.category))
        .collect()
}

/// Full gallery pipeline: sort, then filter with `query`.
pub fn gallery(projects: Vec<Project>, query: &GalleryQuery) -> Vec<DatedProject> {
    let sorted = sort_projects(projects);
    filter_projects(&sorted, &query.keyword, query.criterion)
        .into_iter()
        .cloned()
        .collect()
}
