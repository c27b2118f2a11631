//! Public gallery and project detail view models.

use axum::extract::{Query, State};
use axum::Json;
use folio_core::date::canonical_date;
use folio_core::listing::{gallery as build_gallery, Criterion, DatedProject};
use folio_core::locale::{translate, Locale};
use folio_core::project::{Category, Project};
use folio_core::slides::{Slide, SlideDeck};
use folio_core::tags::{present_tags, TagBadge};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::{resolve_locale, DetailParams, GalleryParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FilterOption {
    pub criterion: Criterion,
    pub label: String,
    pub selected: bool,
}

/// One card in the gallery grid.
#[derive(Debug, Serialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub location: String,
    pub date: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    pub badges: Vec<TagBadge>,
    /// Detail page link.
    pub href: String,
}

impl ProjectCard {
    fn new(dated: DatedProject, locale: Locale) -> Self {
        let date = dated.date_label();
        let p = dated.project;
        Self {
            badges: present_tags(&p.types, locale),
            href: format!("/project-detail?id={}", urlencoding::encode(&p.id)),
            id: p.id,
            title: p.title,
            subtitle: p.subtitle,
            location: p.location,
            date,
            category: p.category,
            main_image: p.main_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub locale: Locale,
    pub keyword: String,
    pub criterion: Criterion,
    pub filters: Vec<FilterOption>,
    pub search_placeholder: String,
    pub cards: Vec<ProjectCard>,
    /// Set when no card matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// GET /
///
/// Projects with a valid date, newest first, narrowed by keyword and
/// category. If the store cannot be read the gallery is served empty.
pub async fn gallery(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> Json<DataResponse<GalleryView>> {
    let locale = resolve_locale(params.lang.as_deref(), state.config.default_locale);

    let projects = match state.projects().list().await {
        Ok(projects) => projects,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching projects");
            Vec::new()
        }
    };

    let cards: Vec<ProjectCard> = build_gallery(projects, &params.query())
        .into_iter()
        .map(|dated| ProjectCard::new(dated, locale))
        .collect();

    let filters = [
        (Criterion::All, "filter_all"),
        (Criterion::Academic, "filter_academic"),
        (Criterion::Product, "filter_product"),
    ]
    .into_iter()
    .map(|(criterion, key)| FilterOption {
        criterion,
        label: translate(key, locale),
        selected: criterion == params.criterion,
    })
    .collect();

    let empty_message = cards.is_empty().then(|| translate("no_results", locale));

    Json(DataResponse {
        data: GalleryView {
            locale,
            keyword: params.keyword,
            criterion: params.criterion,
            filters,
            search_placeholder: translate("search_placeholder", locale),
            cards,
            empty_message,
        },
    })
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LinkView {
    /// `source` (paper/source link) or `award`.
    pub kind: &'static str,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DetailView {
    pub locale: Locale,
    pub project: Project,
    /// Canonical date, absent when the stored date is invalid.
    pub date: Option<String>,
    pub badges: Vec<TagBadge>,
    pub slides: Vec<Slide>,
    /// `"1 / N"` for the first slide, `"0 / 0"` without slides.
    pub page_label: String,
    /// Journal block, shown for academic projects only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<folio_core::project::Journal>,
    pub links: Vec<LinkView>,
}

impl DetailView {
    fn new(project: Project, locale: Locale) -> Self {
        let deck = SlideDeck::for_project(&project);
        let page_label = deck.label();
        let journal = (project.category == Category::Academic
            && !project.journal.name.is_empty())
        .then(|| project.journal.clone());

        let mut links = Vec::new();
        if !project.source_url.is_empty() {
            links.push(LinkView {
                kind: "source",
                label: translate("link_source", locale),
                url: project.source_url.clone(),
            });
        }
        // The award badge links to the project URL and shows the award text.
        if !project.award.is_empty() {
            links.push(LinkView {
                kind: "award",
                label: project.award.clone(),
                url: project.url.clone(),
            });
        }

        Self {
            locale,
            date: canonical_date(&project.date),
            badges: present_tags(&project.types, locale),
            slides: deck.slides().to_vec(),
            page_label,
            journal,
            links,
            project,
        }
    }
}

/// GET /project-detail?id=
pub async fn project_detail(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> AppResult<Json<DataResponse<DetailView>>> {
    let locale = resolve_locale(params.lang.as_deref(), state.config.default_locale);
    let id = params.id.unwrap_or_default();

    let project = if id.is_empty() {
        None
    } else {
        state.projects().get(&id).await?
    };
    let project = project.ok_or_else(|| {
        tracing::warn!(project_id = %id, "Project not found");
        AppError::NotFound(translate("project_not_found", locale))
    })?;

    Ok(Json(DataResponse {
        data: DetailView::new(project, locale),
    }))
}
