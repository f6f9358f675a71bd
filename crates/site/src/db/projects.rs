//! Project repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portfolio_core::{ProjectId, Slug};

use super::RepositoryError;
use crate::models::{NewProject, Project};

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    title: String,
    slug: String,
    summary: String,
    description: String,
    title_es: Option<String>,
    summary_es: Option<String>,
    description_es: Option<String>,
    tech_stack: String,
    repo_url: Option<String>,
    live_url: Option<String>,
    cover_image: Option<String>,
    video_url: Option<String>,
    is_featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;

        Ok(Self {
            id: ProjectId::new(row.id),
            title: row.title,
            slug,
            summary: row.summary,
            description: row.description,
            title_es: row.title_es,
            summary_es: row.summary_es,
            description_es: row.description_es,
            tech_stack: row.tech_stack,
            repo_url: row.repo_url,
            live_url: row.live_url,
            cover_image: row.cover_image,
            video_url: row.video_url,
            is_featured: row.is_featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROJECT_COLUMNS: &str = "id, title, slug, summary, description, \
     title_es, summary_es, description_es, tech_stack, \
     repo_url, live_url, cover_image, video_url, is_featured, \
     created_at, updated_at";

fn collect(rows: Vec<ProjectRow>) -> Result<Vec<Project>, RepositoryError> {
    rows.into_iter().map(Project::try_from).collect()
}

fn map_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("slug already exists".to_owned());
    }
    RepositoryError::Database(e)
}

/// Repository for project database operations.
pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all projects, newest first, optionally filtered by technology.
    ///
    /// The filter is a case-insensitive substring match against the
    /// comma-separated `tech_stack` column.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, tech: Option<&str>) -> Result<Vec<Project>, RepositoryError> {
        let rows = match tech {
            Some(tech) => {
                sqlx::query_as::<_, ProjectRow>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects
                     WHERE tech_stack ILIKE $1
                     ORDER BY created_at DESC"
                ))
                .bind(format!("%{tech}%"))
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProjectRow>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        collect(rows)
    }

    /// List featured projects for the home page, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured(&self, limit: i64) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE is_featured
             ORDER BY created_at DESC
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        collect(rows)
    }

    /// Get a project by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Project::try_from).transpose()
    }

    /// Get a project by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Project::try_from).transpose()
    }

    /// Create a new project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "INSERT INTO projects (
                 title, slug, summary, description,
                 title_es, summary_es, description_es, tech_stack,
                 repo_url, live_url, cover_image, video_url, is_featured
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&project.title)
        .bind(project.slug.as_str())
        .bind(&project.summary)
        .bind(&project.description)
        .bind(&project.title_es)
        .bind(&project.summary_es)
        .bind(&project.description_es)
        .bind(&project.tech_stack)
        .bind(&project.repo_url)
        .bind(&project.live_url)
        .bind(&project.cover_image)
        .bind(&project.video_url)
        .bind(project.is_featured)
        .fetch_one(self.pool)
        .await
        .map_err(map_conflict)?;

        Project::try_from(row)
    }

    /// Update an existing project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has this ID.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProjectId,
        project: &NewProject,
    ) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "UPDATE projects SET
                 title = $2, slug = $3, summary = $4, description = $5,
                 title_es = $6, summary_es = $7, description_es = $8,
                 tech_stack = $9, repo_url = $10, live_url = $11,
                 cover_image = $12, video_url = $13, is_featured = $14,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(&project.title)
        .bind(project.slug.as_str())
        .bind(&project.summary)
        .bind(&project.description)
        .bind(&project.title_es)
        .bind(&project.summary_es)
        .bind(&project.description_es)
        .bind(&project.tech_stack)
        .bind(&project.repo_url)
        .bind(&project.live_url)
        .bind(&project.cover_image)
        .bind(&project.video_url)
        .bind(project.is_featured)
        .fetch_optional(self.pool)
        .await
        .map_err(map_conflict)?;

        match row {
            Some(row) => Project::try_from(row),
            None => Err(RepositoryError::NotFound),
        }
    }

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
