//! Language switching.

use axum::{
    extract::Path,
    http::{HeaderMap, header},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;
use url::Url;

use portfolio_core::Locale;

use crate::i18n;

/// Switch the UI language and bounce back to the referring page.
///
/// Unknown language codes leave the stored locale untouched. The referrer
/// is only honored when its host matches the request's Host header, so the
/// endpoint cannot be used as an open redirect.
#[instrument(skip(session, headers))]
pub async fn switch_lang(
    Path(code): Path<String>,
    headers: HeaderMap,
    session: Session,
) -> Redirect {
    if let Some(locale) = Locale::from_code(&code) {
        i18n::store_locale(&session, locale).await;
    } else {
        tracing::debug!(code = %code, "Ignoring unsupported language code");
    }

    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok());
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());

    Redirect::to(&same_origin_target(referer, host))
}

/// Pick the redirect target: the referring page when same-origin, `/`
/// otherwise.
fn same_origin_target(referer: Option<&str>, host: Option<&str>) -> String {
    let (Some(referer), Some(host)) = (referer, host) else {
        return "/".to_string();
    };
    let Ok(url) = Url::parse(referer) else {
        return "/".to_string();
    };

    let referer_host = match (url.host_str(), url.port()) {
        (Some(h), Some(p)) => format!("{h}:{p}"),
        (Some(h), None) => h.to_string(),
        (None, _) => return "/".to_string(),
    };

    if referer_host != host {
        return "/".to_string();
    }

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_referer_kept() {
        assert_eq!(
            same_origin_target(Some("https://example.com/projects?tech=rust"), Some("example.com")),
            "/projects?tech=rust"
        );
    }

    #[test]
    fn test_same_origin_with_port() {
        assert_eq!(
            same_origin_target(Some("http://localhost:3000/about"), Some("localhost:3000")),
            "/about"
        );
    }

    #[test]
    fn test_foreign_referer_goes_home() {
        assert_eq!(
            same_origin_target(Some("https://evil.example.net/projects"), Some("example.com")),
            "/"
        );
    }

    #[test]
    fn test_missing_or_garbage_referer_goes_home() {
        assert_eq!(same_origin_target(None, Some("example.com")), "/");
        assert_eq!(same_origin_target(Some("not a url"), Some("example.com")), "/");
        assert_eq!(same_origin_target(Some("https://example.com/"), None), "/");
    }
}
