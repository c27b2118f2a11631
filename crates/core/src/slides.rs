//! Detail page media slider.
//!
//! Builds the ordered slide list handed to the carousel and tracks the
//! "current / total" page indicator.

use serde::Serialize;

use crate::project::Project;

/// Alt text for the lead image slide.
pub const MAIN_IMAGE_ALT: &str = "Main Image";

/// Alt text for additional image slides.
pub const SLIDE_IMAGE_ALT: &str = "Slide Image";

/// Alt text for video slides.
pub const VIDEO_ALT: &str = "Project Video";

/// Presentation hints for video slides. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoHints {
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub muted: bool,
    pub controls: bool,
    pub allow_download: bool,
}

impl Default for VideoHints {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: true,
            muted: true,
            controls: false,
            allow_download: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlideKind {
    Video { hints: VideoHints },
    Image,
}

/// One entry of the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    #[serde(flatten)]
    pub kind: SlideKind,
    pub url: String,
    pub alt_text: String,
}

impl Slide {
    pub fn video(url: &str) -> Self {
        Self {
            kind: SlideKind::Video {
                hints: VideoHints::default(),
            },
            url: url.to_string(),
            alt_text: VIDEO_ALT.to_string(),
        }
    }

    pub fn image(url: &str, alt_text: &str) -> Self {
        Self {
            kind: SlideKind::Image,
            url: url.to_string(),
            alt_text: alt_text.to_string(),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self.kind, SlideKind::Video { .. })
    }
}

/// Build the slide sequence for a project.
///
/// Lead slides come from the first non-empty source of `videos` (one slide
/// each), the legacy `movie` field, or `main_image`. Every entry of
/// `images` is appended afterwards regardless of which lead source was used.
pub fn build_slides(project: &Project) -> Vec<Slide> {
    let mut slides = Vec::with_capacity(project.videos.len() + project.images.len() + 1);

    if !project.videos.is_empty() {
        slides.extend(project.videos.iter().map(|url| Slide::video(url)));
    } else if let Some(movie) = &project.movie {
        slides.push(Slide::video(movie));
    } else if let Some(main) = &project.main_image {
        slides.push(Slide::image(main, MAIN_IMAGE_ALT));
    }

    slides.extend(
        project
            .images
            .iter()
            .map(|url| Slide::image(url, SLIDE_IMAGE_ALT)),
    );
    slides
}

/// Page indicator text, e.g. `"2 / 5"`. `current` is 1-based.
pub fn page_label(current: usize, total: usize) -> String {
    format!("{current} / {total}")
}

/// Carousel position over a fixed slide list.
///
/// Navigation wraps around in both directions, matching a looping carousel.
#[derive(Debug, Clone, Serialize)]
pub struct SlideDeck {
    slides: Vec<Slide>,
    active: usize,
}

impl SlideDeck {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides, active: 0 }
    }

    pub fn for_project(project: &Project) -> Self {
        Self::new(build_slides(project))
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn active(&self) -> Option<&Slide> {
        self.slides.get(self.active)
    }

    /// Current indicator text. An empty deck shows `"0 / 0"`.
    pub fn label(&self) -> String {
        if self.slides.is_empty() {
            page_label(0, 0)
        } else {
            page_label(self.active + 1, self.slides.len())
        }
    }

    /// Jump to `index` (0-based, wrapped) and return the new indicator text.
    pub fn select(&mut self, index: usize) -> String {
        if !self.slides.is_empty() {
            self.active = index % self.slides.len();
        }
        self.label()
    }

    pub fn next(&mut self) -> String {
        self.select(self.active + 1)
    }

    pub fn prev(&mut self) -> String {
        let len = self.slides.len().max(1);
        self.select(self.active + len - 1)
    }
}
