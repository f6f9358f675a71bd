//! Admin contact message inbox.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use portfolio_core::MessageId;

use crate::db::{ContactMessageRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::ContactMessage;
use crate::routes::PageContext;
use crate::state::AppState;

/// Bare CSRF token form for one-button actions.
#[derive(Debug, Deserialize)]
pub struct CsrfForm {
    pub csrf_token: String,
}

/// Inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/messages.html")]
pub struct MessagesTemplate {
    pub page: PageContext,
    pub messages: Vec<ContactMessage>,
}

/// Display the message inbox, unprocessed first.
#[instrument(skip(state, session))]
pub async fn inbox(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
) -> Result<MessagesTemplate> {
    let messages = ContactMessageRepository::new(state.pool()).list().await?;

    Ok(MessagesTemplate {
        page: PageContext::build(&session).await,
        messages,
    })
}

/// Toggle the processed flag on a message.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect> {
    if !crate::csrf::verify(&session, &form.csrf_token).await {
        return Ok(Redirect::to("/admin/messages"));
    }

    ContactMessageRepository::new(state.pool())
        .toggle_processed(MessageId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("message {id}")),
            other => other.into(),
        })?;

    crate::flash::push(&session, crate::flash::Level::Success, "Message updated.").await;
    Ok(Redirect::to("/admin/messages"))
}

/// Delete a message.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect> {
    if !crate::csrf::verify(&session, &form.csrf_token).await {
        return Ok(Redirect::to("/admin/messages"));
    }

    ContactMessageRepository::new(state.pool())
        .delete(MessageId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("message {id}")),
            other => other.into(),
        })?;

    crate::flash::push(&session, crate::flash::Level::Info, "Message deleted.").await;
    Ok(Redirect::to("/admin/messages"))
}
