//! Admin panel route handlers.
//!
//! Every handler here (except the login pair) takes the
//! [`crate::middleware::RequireAdmin`] extractor, so the whole surface is
//! authenticated by construction rather than by a path prefix check.

pub mod auth;
pub mod dashboard;
pub mod messages;
pub mod projects;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin routes router.
///
/// `login_path` is configurable so the login page does not have to sit at
/// a guessable URL; everything else lives under `/admin`.
pub fn admin_routes(login_path: &str) -> Router<AppState> {
    Router::new()
        .route(login_path, get(auth::login_page).post(auth::login))
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/logout", get(auth::logout).post(auth::logout))
        .route(
            "/admin/projects/new",
            get(projects::new_form).post(projects::create),
        )
        .route(
            "/admin/projects/{id}/edit",
            get(projects::edit_form).post(projects::update),
        )
        .route("/admin/projects/{id}/delete", post(projects::delete))
        .route("/admin/messages", get(messages::inbox))
        .route("/admin/messages/{id}/toggle", post(messages::toggle))
        .route("/admin/messages/{id}/delete", post(messages::delete))
}
