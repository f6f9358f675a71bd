//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::{DateTime, Utc};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ProjectRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::Project;
use crate::routes::PageContext;
use crate::state::AppState;

/// A project row on the dashboard.
pub struct ProjectRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub is_featured: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.as_i32(),
            title: project.title.clone(),
            slug: project.slug.to_string(),
            is_featured: project.is_featured,
            updated_at: project.updated_at,
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub page: PageContext,
    pub admin_name: String,
    pub projects: Vec<ProjectRow>,
}

/// Display the dashboard with all projects.
#[instrument(skip(state, session))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
) -> Result<DashboardTemplate> {
    let projects = ProjectRepository::new(state.pool()).list(None).await?;

    Ok(DashboardTemplate {
        page: PageContext::build(&session).await,
        admin_name: admin.name,
        projects: projects.iter().map(ProjectRow::from).collect(),
    })
}
