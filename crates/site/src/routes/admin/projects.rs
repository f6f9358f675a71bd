//! Admin project CRUD.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use portfolio_core::{ProjectId, Slug};

use crate::db::{ProjectRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{NewProject, Project};
use crate::routes::PageContext;
use crate::routes::admin::messages::CsrfForm;
use crate::state::AppState;
use crate::{csrf, flash};

/// Maximum project title length (matches the column constraint).
const MAX_TITLE_LENGTH: usize = 120;
/// Maximum summary length; longer prose belongs in the description.
const MAX_SUMMARY_LENGTH: usize = 280;

/// Raw project form input, all strings for faithful redisplay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub title_es: String,
    #[serde(default)]
    pub summary_es: String,
    #[serde(default)]
    pub description_es: String,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub video_url: String,
    /// Checkbox: present ("on") when ticked, absent otherwise.
    pub is_featured: Option<String>,
}

impl ProjectForm {
    fn from_project(project: &Project) -> Self {
        Self {
            csrf_token: String::new(),
            title: project.title.clone(),
            slug: project.slug.to_string(),
            summary: project.summary.clone(),
            description: project.description.clone(),
            title_es: project.title_es.clone().unwrap_or_default(),
            summary_es: project.summary_es.clone().unwrap_or_default(),
            description_es: project.description_es.clone().unwrap_or_default(),
            tech_stack: project.tech_stack.clone(),
            repo_url: project.repo_url.clone().unwrap_or_default(),
            live_url: project.live_url.clone().unwrap_or_default(),
            cover_image: project.cover_image.clone().unwrap_or_default(),
            video_url: project.video_url.clone().unwrap_or_default(),
            is_featured: project.is_featured.then(|| "on".to_string()),
        }
    }

    const fn featured(&self) -> bool {
        self.is_featured.is_some()
    }
}

/// Field errors for the project form, empty string meaning "no error".
#[derive(Default)]
pub struct ProjectFormErrors {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
}

impl ProjectFormErrors {
    fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.slug.is_empty()
            && self.summary.is_empty()
            && self.description.is_empty()
    }
}

/// Project create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/project_form.html")]
pub struct ProjectFormTemplate {
    pub page: PageContext,
    pub heading: String,
    /// Form action URL.
    pub action: String,
    pub form: ProjectForm,
    pub errors: ProjectFormErrors,
}

fn validate(form: &ProjectForm) -> std::result::Result<NewProject, ProjectFormErrors> {
    let mut errors = ProjectFormErrors::default();

    let title = form.title.trim();
    if title.is_empty() {
        errors.title = "Title is required.".to_string();
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        errors.title = format!("Title must be at most {MAX_TITLE_LENGTH} characters.");
    }

    let slug = match Slug::parse(&form.slug) {
        Ok(slug) => Some(slug),
        Err(e) => {
            errors.slug = e.to_string();
            None
        }
    };

    let summary = form.summary.trim();
    if summary.is_empty() {
        errors.summary = "Summary is required.".to_string();
    } else if summary.chars().count() > MAX_SUMMARY_LENGTH {
        errors.summary = format!("Summary must be at most {MAX_SUMMARY_LENGTH} characters.");
    }
    if form.description.trim().is_empty() {
        errors.description = "Description is required.".to_string();
    }

    let Some(slug) = slug else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewProject {
        title: title.to_string(),
        slug,
        summary: summary.to_string(),
        description: form.description.trim().to_string(),
        title_es: optional(&form.title_es),
        summary_es: optional(&form.summary_es),
        description_es: optional(&form.description_es),
        tech_stack: form.tech_stack.trim().to_string(),
        repo_url: optional(&form.repo_url),
        live_url: optional(&form.live_url),
        cover_image: optional(&form.cover_image),
        video_url: optional(&form.video_url),
        is_featured: form.featured(),
    })
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Display the empty project form.
#[instrument(skip(session))]
pub async fn new_form(
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
) -> ProjectFormTemplate {
    ProjectFormTemplate {
        page: PageContext::build(&session).await,
        heading: "New project".to_string(),
        action: "/admin/projects/new".to_string(),
        form: ProjectForm::default(),
        errors: ProjectFormErrors::default(),
    }
}

/// Create a project.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Form(form): Form<ProjectForm>,
) -> Result<Response> {
    if !csrf::verify(&session, &form.csrf_token).await {
        return Ok(Redirect::to("/admin/projects/new").into_response());
    }

    let new_project = match validate(&form) {
        Ok(new_project) => new_project,
        Err(errors) => {
            return Ok(render_form(
                &session,
                "New project",
                "/admin/projects/new",
                form,
                errors,
            )
            .await
            .into_response());
        }
    };

    match ProjectRepository::new(state.pool()).create(&new_project).await {
        Ok(project) => {
            flash::push(&session, flash::Level::Success, "Project created.").await;
            tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
            Ok(Redirect::to("/admin").into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            let errors = ProjectFormErrors {
                slug: "A project with this slug or title already exists.".to_string(),
                ..ProjectFormErrors::default()
            };
            Ok(render_form(&session, "New project", "/admin/projects/new", form, errors)
                .await
                .into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// Display the edit form for an existing project.
#[instrument(skip(state, session))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Path(id): Path<i32>,
) -> Result<ProjectFormTemplate> {
    let project = ProjectRepository::new(state.pool())
        .get_by_id(ProjectId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;

    Ok(ProjectFormTemplate {
        page: PageContext::build(&session).await,
        heading: format!("Edit: {}", project.title),
        action: format!("/admin/projects/{id}/edit"),
        form: ProjectForm::from_project(&project),
        errors: ProjectFormErrors::default(),
    })
}

/// Update a project.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<ProjectForm>,
) -> Result<Response> {
    let action = format!("/admin/projects/{id}/edit");

    if !csrf::verify(&session, &form.csrf_token).await {
        return Ok(Redirect::to(&action).into_response());
    }

    let new_project = match validate(&form) {
        Ok(new_project) => new_project,
        Err(errors) => {
            return Ok(render_form(&session, "Edit project", &action, form, errors)
                .await
                .into_response());
        }
    };

    match ProjectRepository::new(state.pool())
        .update(ProjectId::new(id), &new_project)
        .await
    {
        Ok(_) => {
            flash::push(&session, flash::Level::Success, "Project updated.").await;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("project {id}"))),
        Err(RepositoryError::Conflict(_)) => {
            let errors = ProjectFormErrors {
                slug: "A project with this slug or title already exists.".to_string(),
                ..ProjectFormErrors::default()
            };
            Ok(render_form(&session, "Edit project", &action, form, errors)
                .await
                .into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// Delete a project.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect> {
    if !csrf::verify(&session, &form.csrf_token).await {
        return Ok(Redirect::to("/admin"));
    }

    ProjectRepository::new(state.pool())
        .delete(ProjectId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("project {id}")),
            other => other.into(),
        })?;

    flash::push(&session, flash::Level::Info, "Project deleted.").await;
    Ok(Redirect::to("/admin"))
}

async fn render_form(
    session: &Session,
    heading: &str,
    action: &str,
    form: ProjectForm,
    errors: ProjectFormErrors,
) -> ProjectFormTemplate {
    ProjectFormTemplate {
        page: PageContext::build(session).await,
        heading: heading.to_string(),
        action: action.to_string(),
        form,
        errors,
    }
}
