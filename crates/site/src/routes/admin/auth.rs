//! Admin login and logout.

use std::net::SocketAddr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{ConnectInfo, Form, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::auth::set_current_user;
use crate::middleware::security_headers::clear_site_data_header;
use crate::models::CurrentUser;
use crate::routes::PageContext;
use crate::services::auth::{AuthError, AuthService};
use crate::services::throttle::client_ip;
use crate::state::AppState;
use crate::{csrf, flash};

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    /// Form action; echoes the configured login path.
    pub login_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub csrf_token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Display the login form.
#[instrument(skip(state, session))]
pub async fn login_page(State(state): State<AppState>, session: Session) -> LoginTemplate {
    LoginTemplate {
        page: PageContext::build(&session).await,
        login_path: state.config().admin_login_path.clone(),
    }
}

/// Handle a login attempt.
///
/// Over-limit attempts and bad credentials produce the same generic
/// rejection, so neither account existence nor throttle state leaks.
#[instrument(skip(state, session, headers, form))]
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let login_path = state.config().admin_login_path.clone();

    if !csrf::verify(&session, &form.csrf_token).await {
        flash::push(
            &session,
            flash::Level::Danger,
            "Your session expired, please try again.",
        )
        .await;
        return Ok(Redirect::to(&login_path).into_response());
    }

    let ip = client_ip(&headers, peer);
    if !state.login_throttle().check(ip) {
        tracing::warn!(ip = %ip, "Login attempt rejected by throttle");
        flash::push(&session, flash::Level::Danger, "Invalid credentials.").await;
        return Ok(Redirect::to(&login_path).into_response());
    }

    let user = match AuthService::new(state.pool())
        .verify_admin(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(ip = %ip, "Failed admin login attempt");
            flash::push(&session, flash::Level::Danger, "Invalid credentials.").await;
            return Ok(Redirect::to(&login_path).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    // New session ID on privilege change, against session fixation
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %user.id, "Admin logged in");
    Ok(Redirect::to("/admin").into_response())
}

/// Log out and clear client-side state.
///
/// Besides destroying the server-side session, sends `Clear-Site-Data` so
/// the browser drops cache, cookies and storage for the site.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    let mut response = Redirect::to("/").into_response();
    let (name, value) = clear_site_data_header();
    response.headers_mut().insert(name, value);
    Ok(response)
}
