//! Home and about pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ProjectRepository;
use crate::error::Result;
use crate::filters;
use crate::routes::PageContext;
use crate::routes::projects::ProjectView;
use crate::state::AppState;

/// Number of featured projects shown on the home page.
const FEATURED_LIMIT: i64 = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<ProjectView>,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Display the home page with featured projects.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let page = PageContext::build(&session).await;

    let featured = ProjectRepository::new(state.pool())
        .featured(FEATURED_LIMIT)
        .await?;

    Ok(HomeTemplate {
        featured: featured
            .iter()
            .map(|p| ProjectView::from_project(p, page.locale))
            .collect(),
        page,
    })
}

/// Display the about page.
#[instrument(skip(session))]
pub async fn about(session: Session) -> AboutTemplate {
    AboutTemplate {
        page: PageContext::build(&session).await,
    }
}
