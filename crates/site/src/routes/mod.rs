//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured projects)
//! GET  /about                  - About page
//! GET  /projects               - Project listing (?tech= filter)
//! GET  /projects/{slug}        - Project detail
//! GET  /contact                - Contact form
//! POST /contact                - Contact form submission
//! GET  /switch_lang/{code}     - Switch UI language
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Admin (all require authentication)
//! GET  <ADMIN_LOGIN_PATH>      - Login page (path is configurable)
//! POST <ADMIN_LOGIN_PATH>      - Login action (throttled per IP)
//! GET|POST /admin/logout       - Logout action
//! GET  /admin                  - Dashboard (project list)
//! GET  /admin/projects/new     - New project form
//! POST /admin/projects/new     - Create project
//! GET  /admin/projects/{id}/edit  - Edit project form
//! POST /admin/projects/{id}/edit  - Update project
//! POST /admin/projects/{id}/delete - Delete project
//! GET  /admin/messages         - Contact message inbox
//! POST /admin/messages/{id}/toggle - Toggle processed flag
//! POST /admin/messages/{id}/delete - Delete message
//! ```

pub mod admin;
pub mod contact;
pub mod lang;
pub mod pages;
pub mod projects;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use tower_sessions::Session;

use portfolio_core::Locale;

use crate::flash::Flash;
use crate::state::AppState;
use crate::{csrf, flash, i18n};

/// Per-request rendering context shared by every page template.
///
/// Built once per GET render; building it drains the flash queue, so a
/// handler must not build two of these for one response.
pub struct PageContext {
    /// Resolved UI locale.
    pub locale: Locale,
    /// Flash messages drained from the session.
    pub flashes: Vec<Flash>,
    /// CSRF token for forms on this page.
    pub csrf_token: String,
}

impl PageContext {
    /// Build the context from the request session.
    pub async fn build(session: &Session) -> Self {
        Self {
            locale: i18n::resolve_locale(session).await,
            flashes: flash::take(session).await,
            csrf_token: csrf::token(session).await,
        }
    }

    /// Translate a UI string for this page's locale.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        i18n::translate(self.locale, key)
    }

    /// Two-letter code of the current locale.
    #[must_use]
    pub const fn lang(&self) -> &'static str {
        self.locale.code()
    }

    /// Two-letter code of the other available locale.
    #[must_use]
    pub const fn other_lang(&self) -> &'static str {
        match self.locale {
            Locale::En => "es",
            Locale::Es => "en",
        }
    }
}

/// Create the public routes router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/projects", get(projects::index))
        .route("/projects/{slug}", get(projects::show))
        .route(
            "/contact",
            get(contact::contact_page).post(contact::submit),
        )
        .route("/switch_lang/{code}", get(lang::switch_lang))
}

/// Create the full application router (public + admin + health).
///
/// `admin_login_path` comes from configuration and must start with `/`
/// (enforced during config loading).
pub fn routes(admin_login_path: &str) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(public_routes())
        .merge(admin::admin_routes(admin_login_path))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
