//! Presentation of project type tags: badge color and localized label.
//!
//! Tags were entered in either Japanese or English over the life of the
//! gallery, so the lookup table is keyed by both spellings.

use serde::Serialize;

use crate::locale::{translate, Locale};

/// Badge background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Blue,
    Orange,
    Red,
    Green,
    Gray,
}

impl TagColor {
    /// CSS hex value.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#336699",
            Self::Orange => "#e97132",
            Self::Red => "#cc0000",
            Self::Green => "#009933",
            Self::Gray => "#52565e",
        }
    }
}

/// (Japanese spelling, English spelling, color, locale key)
const KNOWN_TAGS: &[(&str, &str, TagColor, &str)] = &[
    ("口頭発表", "Presentation", TagColor::Blue, "tag_oral"),
    ("デモポスター", "Demo Poster", TagColor::Orange, "tag_demo"),
    ("フルペーパー", "Full Paper", TagColor::Red, "tag_full"),
    ("一般", "General", TagColor::Green, "tag_general"),
    ("学内発表", "Internal Presentation", TagColor::Gray, "tag_internal"),
];

fn lookup(tag: &str) -> Option<&'static (&'static str, &'static str, TagColor, &'static str)> {
    let tag = tag.trim();
    KNOWN_TAGS.iter().find(|(ja, en, _, _)| *ja == tag || *en == tag)
}

/// Badge color for `tag`. Unknown tags are gray.
pub fn color_of(tag: &str) -> TagColor {
    lookup(tag).map_or(TagColor::Gray, |(_, _, color, _)| *color)
}

/// Display label for `tag` in `locale`. Unknown tags pass through unchanged.
pub fn label_of(tag: &str, locale: Locale) -> String {
    match lookup(tag) {
        Some((_, _, _, key)) => translate(key, locale),
        None => tag.to_string(),
    }
}

/// A rendered tag badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBadge {
    pub tag: String,
    pub label: String,
    pub color: TagColor,
    pub hex: &'static str,
}

/// Badges for every tag of a record, in display order.
pub fn present_tags(tags: &[String], locale: Locale) -> Vec<TagBadge> {
    tags.iter()
        .map(|tag| {
            let color = color_of(tag);
            TagBadge {
                tag: tag.clone(),
                label: label_of(tag, locale),
                color,
                hex: color.hex(),
            }
        })
        .collect()
}
