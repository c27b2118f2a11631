//! Query parameter types for the view routes.

use folio_core::listing::{Criterion, GalleryQuery};
use folio_core::locale::Locale;
use serde::Deserialize;

/// `?keyword=&criterion=&lang=` on the gallery.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GalleryParams {
    pub keyword: String,
    pub criterion: Criterion,
    pub lang: Option<String>,
}

impl GalleryParams {
    pub fn query(&self) -> GalleryQuery {
        GalleryQuery {
            keyword: self.keyword.clone(),
            criterion: self.criterion,
        }
    }
}

/// `?id=&lang=` on the detail page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetailParams {
    pub id: Option<String>,
    pub lang: Option<String>,
}

/// `?lang=` alone.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LangParams {
    pub lang: Option<String>,
}

/// Resolve an optional `lang` parameter against the configured default.
pub fn resolve_locale(lang: Option<&str>, default: Locale) -> Locale {
    lang.filter(|tag| !tag.trim().is_empty())
        .map(Locale::from_tag)
        .unwrap_or(default)
}
