//! Locale catalog for display strings.
//!
//! Two flat key → string resources are embedded at build time. Lookups fall
//! back from the requested locale to Japanese and finally to the raw key.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

type Catalog = HashMap<String, String>;

static JA: LazyLock<Catalog> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../locales/ja.json")).expect("valid ja locale resource")
});

static EN: LazyLock<Catalog> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../locales/en.json")).expect("valid en locale resource")
});

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Locale used when a key is missing from the requested catalog.
pub const FALLBACK_LOCALE: Locale = Locale::Ja;

impl Locale {
    /// Parse a language tag such as `en`, `en-US` or `ja_JP`.
    ///
    /// Unsupported languages resolve to the default locale.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        match primary.as_str() {
            "en" => Self::En,
            _ => Self::Ja,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    fn catalog(self) -> &'static Catalog {
        match self {
            Self::Ja => &JA,
            Self::En => &EN,
        }
    }
}

/// Look up `key` for `locale`, falling back to [`FALLBACK_LOCALE`] and then
/// to the key itself.
pub fn translate(key: &str, locale: Locale) -> String {
    locale
        .catalog()
        .get(key)
        .or_else(|| FALLBACK_LOCALE.catalog().get(key))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}
