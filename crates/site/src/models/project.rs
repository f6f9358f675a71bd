//! Project model.

use chrono::{DateTime, Utc};

use portfolio_core::{Locale, ProjectId, Slug};

/// A portfolio project.
///
/// English content is canonical; the `_es` columns hold optional Spanish
/// translations and fall back to English when absent.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project's database ID.
    pub id: ProjectId,
    /// English title.
    pub title: String,
    /// URL-safe unique identifier.
    pub slug: Slug,
    /// Short English summary shown on listing cards.
    pub summary: String,
    /// Full English description shown on the detail page.
    pub description: String,
    /// Spanish title (optional).
    pub title_es: Option<String>,
    /// Spanish summary (optional).
    pub summary_es: Option<String>,
    /// Spanish description (optional).
    pub description_es: Option<String>,
    /// Comma-separated technology tags (e.g., "rust,axum,postgres").
    pub tech_stack: String,
    /// Source repository URL (optional).
    pub repo_url: Option<String>,
    /// Live deployment URL (optional).
    pub live_url: Option<String>,
    /// Cover image URL (optional).
    pub cover_image: Option<String>,
    /// Demo video URL (optional).
    pub video_url: Option<String>,
    /// Whether the project appears on the home page.
    pub is_featured: bool,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Title for the given locale, falling back to English.
    #[must_use]
    pub fn localized_title(&self, locale: Locale) -> &str {
        localized(locale, self.title_es.as_deref(), &self.title)
    }

    /// Summary for the given locale, falling back to English.
    #[must_use]
    pub fn localized_summary(&self, locale: Locale) -> &str {
        localized(locale, self.summary_es.as_deref(), &self.summary)
    }

    /// Description for the given locale, falling back to English.
    #[must_use]
    pub fn localized_description(&self, locale: Locale) -> &str {
        localized(locale, self.description_es.as_deref(), &self.description)
    }

    /// Individual technology tags, trimmed, empty entries dropped.
    #[must_use]
    pub fn tech_tags(&self) -> Vec<&str> {
        self.tech_stack
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

fn localized<'a>(locale: Locale, spanish: Option<&'a str>, english: &'a str) -> &'a str {
    if locale.is_spanish()
        && let Some(es) = spanish
        && !es.trim().is_empty()
    {
        return es;
    }
    english
}

/// Fields accepted when creating or updating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// English title.
    pub title: String,
    /// URL-safe unique identifier.
    pub slug: Slug,
    /// Short English summary.
    pub summary: String,
    /// Full English description.
    pub description: String,
    /// Spanish title (optional).
    pub title_es: Option<String>,
    /// Spanish summary (optional).
    pub summary_es: Option<String>,
    /// Spanish description (optional).
    pub description_es: Option<String>,
    /// Comma-separated technology tags.
    pub tech_stack: String,
    /// Source repository URL (optional).
    pub repo_url: Option<String>,
    /// Live deployment URL (optional).
    pub live_url: Option<String>,
    /// Cover image URL (optional).
    pub cover_image: Option<String>,
    /// Demo video URL (optional).
    pub video_url: Option<String>,
    /// Whether the project appears on the home page.
    pub is_featured: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            id: ProjectId::new(1),
            title: "Terminal Dashboard".to_string(),
            slug: Slug::parse("terminal-dashboard").unwrap(),
            summary: "A dashboard".to_string(),
            description: "Long description".to_string(),
            title_es: Some("Panel de Terminal".to_string()),
            summary_es: None,
            description_es: Some("  ".to_string()),
            tech_stack: "rust, axum ,postgres,".to_string(),
            repo_url: None,
            live_url: None,
            cover_image: None,
            video_url: None,
            is_featured: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_localized_title_uses_spanish() {
        let project = sample();
        assert_eq!(project.localized_title(Locale::Es), "Panel de Terminal");
        assert_eq!(project.localized_title(Locale::En), "Terminal Dashboard");
    }

    #[test]
    fn test_localized_falls_back_when_missing_or_blank() {
        let project = sample();
        // summary_es is None, description_es is whitespace only
        assert_eq!(project.localized_summary(Locale::Es), "A dashboard");
        assert_eq!(project.localized_description(Locale::Es), "Long description");
    }

    #[test]
    fn test_tech_tags_trims_and_drops_empty() {
        let project = sample();
        assert_eq!(project.tech_tags(), vec!["rust", "axum", "postgres"]);
    }
}
