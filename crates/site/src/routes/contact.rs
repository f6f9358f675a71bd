//! Contact form page and submission handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ContactMessageRepository;
use crate::error::Result;
use crate::filters;
use crate::routes::PageContext;
use crate::services::contact::{ContactPipeline, FieldErrors, Submission, SubmissionOutcome};
use crate::state::AppState;
use crate::{csrf, flash};

/// Contact form input.
///
/// The `nickname` field is the honeypot: it is visually hidden, real
/// visitors leave it empty, and naive form-filling bots populate it.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub csrf_token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub nickname: String,
}

/// Template-facing validation errors, empty string meaning "no error".
#[derive(Default)]
pub struct FormErrors {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<FieldErrors> for FormErrors {
    fn from(errors: FieldErrors) -> Self {
        Self {
            name: errors.name.unwrap_or_default(),
            email: errors.email.unwrap_or_default(),
            message: errors.message.unwrap_or_default(),
        }
    }
}

/// Previously submitted values for redisplay.
#[derive(Default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: PageContext,
    pub values: FormValues,
    pub errors: FormErrors,
    /// Show the uniform confirmation banner instead of the form.
    pub submitted: bool,
}

/// Display the contact form.
#[instrument(skip(session))]
pub async fn contact_page(session: Session) -> ContactTemplate {
    ContactTemplate {
        page: PageContext::build(&session).await,
        values: FormValues::default(),
        errors: FormErrors::default(),
        submitted: false,
    }
}

/// Handle a contact form submission.
///
/// Spam and duplicate rejections render the same confirmation as an
/// accepted message; only structural validation errors redisplay the form.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    if !csrf::verify(&session, &form.csrf_token).await {
        flash::push(
            &session,
            flash::Level::Danger,
            "Your session expired, please try again.",
        )
        .await;
        return Ok(Redirect::to("/contact").into_response());
    }

    let repo = ContactMessageRepository::new(state.pool());
    let pipeline = ContactPipeline::new(&repo, state.notifier());

    let outcome = pipeline
        .submit(&Submission {
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
            honeypot: form.nickname,
        })
        .await?;

    let page = PageContext::build(&session).await;
    let template = match outcome {
        SubmissionOutcome::RejectedInvalid(errors) => ContactTemplate {
            page,
            values: FormValues {
                name: form.name,
                email: form.email,
                message: form.message,
            },
            errors: errors.into(),
            submitted: false,
        },
        // Accepted, spam and duplicate all render the same confirmation
        _ => ContactTemplate {
            page,
            values: FormValues::default(),
            errors: FormErrors::default(),
            submitted: true,
        },
    };

    Ok(template.into_response())
}
