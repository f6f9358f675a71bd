//! Public project pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use portfolio_core::{Locale, Slug};

use crate::db::ProjectRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Project;
use crate::routes::PageContext;
use crate::state::AppState;

/// Project display data for templates, resolved to one locale.
///
/// Optional URLs are flattened to empty strings so templates can test
/// `is_empty()` instead of pattern matching.
#[derive(Clone)]
pub struct ProjectView {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
    pub tech_tags: Vec<String>,
    pub repo_url: String,
    pub live_url: String,
    pub cover_image: String,
    pub video_url: String,
}

impl ProjectView {
    /// Resolve a project's bilingual content for one locale.
    #[must_use]
    pub fn from_project(project: &Project, locale: Locale) -> Self {
        Self {
            title: project.localized_title(locale).to_string(),
            slug: project.slug.to_string(),
            summary: project.localized_summary(locale).to_string(),
            description: project.localized_description(locale).to_string(),
            tech_tags: project
                .tech_tags()
                .into_iter()
                .map(str::to_string)
                .collect(),
            repo_url: project.repo_url.clone().unwrap_or_default(),
            live_url: project.live_url.clone().unwrap_or_default(),
            cover_image: project.cover_image.clone().unwrap_or_default(),
            video_url: project.video_url.clone().unwrap_or_default(),
        }
    }
}

/// Project listing template.
#[derive(Template, WebTemplate)]
#[template(path = "projects/list.html")]
pub struct ProjectListTemplate {
    pub page: PageContext,
    pub projects: Vec<ProjectView>,
    /// Active tech filter, empty when listing everything.
    pub tech_filter: String,
}

/// Project detail template.
#[derive(Template, WebTemplate)]
#[template(path = "projects/detail.html")]
pub struct ProjectDetailTemplate {
    pub page: PageContext,
    pub project: ProjectView,
}

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    /// Case-insensitive substring filter over the tech stack.
    pub tech: Option<String>,
}

/// Display the project listing, optionally filtered by technology.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProjectQuery>,
) -> Result<ProjectListTemplate> {
    let page = PageContext::build(&session).await;

    let tech = query
        .tech
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let projects = ProjectRepository::new(state.pool()).list(tech).await?;

    Ok(ProjectListTemplate {
        projects: projects
            .iter()
            .map(|p| ProjectView::from_project(p, page.locale))
            .collect(),
        tech_filter: tech.unwrap_or_default().to_string(),
        page,
    })
}

/// Display a single project by slug.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<ProjectDetailTemplate> {
    // An unparseable slug can't match any stored project
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(slug.clone()))?;

    let project = ProjectRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(slug.to_string()))?;

    let page = PageContext::build(&session).await;
    Ok(ProjectDetailTemplate {
        project: ProjectView::from_project(&project, page.locale),
        page,
    })
}
