//! Database seeding command for local development.

use portfolio_core::Slug;
use portfolio_site::db::{ProjectRepository, RepositoryError};
use portfolio_site::models::NewProject;

use super::CommandError;

/// Seed the database with sample projects.
///
/// Projects whose slug already exists are skipped, so reseeding is safe.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails
/// for a reason other than a duplicate slug.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let repo = ProjectRepository::new(&pool);

    for project in sample_projects() {
        match repo.create(&project).await {
            Ok(created) => {
                tracing::info!("Seeded project: {} ({})", created.title, created.slug);
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!("Skipping existing project: {}", project.slug);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seeding complete!");
    Ok(())
}

fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Portfolio Site".to_owned(),
            slug: seed_slug("portfolio-site"),
            summary: "This very website: a bilingual portfolio with an admin panel."
                .to_owned(),
            description: "Server-rendered portfolio site with a contact pipeline, \
                          bilingual content, and a small admin panel for managing \
                          projects and messages."
                .to_owned(),
            title_es: Some("Sitio de portafolio".to_owned()),
            summary_es: Some(
                "Este mismo sitio: un portafolio bilingüe con panel de administración."
                    .to_owned(),
            ),
            description_es: None,
            tech_stack: "Rust, Axum, PostgreSQL, Askama".to_owned(),
            repo_url: Some("https://github.com/carlossibrian/portfolio".to_owned()),
            live_url: None,
            cover_image: None,
            video_url: None,
            is_featured: true,
        },
        NewProject {
            title: "Recipe Box".to_owned(),
            slug: seed_slug("recipe-box"),
            summary: "A small recipe manager with tagging and full-text search.".to_owned(),
            description: "Web app for collecting household recipes, with ingredient \
                          scaling and weekly meal planning."
                .to_owned(),
            title_es: Some("Recetario".to_owned()),
            summary_es: Some(
                "Un pequeño gestor de recetas con etiquetas y búsqueda de texto.".to_owned(),
            ),
            description_es: None,
            tech_stack: "Python, Flask, SQLite".to_owned(),
            repo_url: None,
            live_url: None,
            cover_image: None,
            video_url: None,
            is_featured: true,
        },
        NewProject {
            title: "Trail Tracker".to_owned(),
            slug: seed_slug("trail-tracker"),
            summary: "GPX track visualizer for hiking trips.".to_owned(),
            description: "Uploads GPX files, renders elevation profiles and computes \
                          hiking statistics per trip."
                .to_owned(),
            title_es: None,
            summary_es: None,
            description_es: None,
            tech_stack: "TypeScript, Leaflet, Node.js".to_owned(),
            repo_url: None,
            live_url: None,
            cover_image: None,
            video_url: None,
            is_featured: false,
        },
    ]
}

fn seed_slug(value: &str) -> Slug {
    // Seed slugs are static and known-valid
    #[allow(clippy::expect_used)]
    Slug::parse(value).expect("seed slug is valid")
}
