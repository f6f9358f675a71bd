//! Security headers middleware.
//!
//! Adds baseline security headers to every response, plus cache suppression
//! on admin surfaces (including the configurable login path) so that
//! authenticated pages never land in shared caches or the browser's
//! back-forward cache.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{CACHE_CONTROL, EXPIRES, PRAGMA, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
    },
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Add security headers to all responses.
///
/// Headers applied everywhere:
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `X-Frame-Options: SAMEORIGIN` - Prevent cross-site framing
///
/// Added on `/admin` paths and the configured login page:
/// - `Cache-Control: no-store, no-cache, must-revalidate, max-age=0`
/// - `Pragma: no-cache`
/// - `Expires: 0`
pub async fn security_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let is_admin_surface =
        path.starts_with("/admin") || path == state.config().admin_login_path;

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // Prevent MIME sniffing
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

    // Prevent cross-site framing
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));

    if is_admin_surface {
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
        );
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(EXPIRES, HeaderValue::from_static("0"));
    }

    response
}

/// Value of the `Clear-Site-Data` header sent on logout.
pub const CLEAR_SITE_DATA: &str = "\"cache\", \"cookies\", \"storage\"";

/// `Clear-Site-Data` header name (not in `http::header` constants).
#[must_use]
pub fn clear_site_data_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("clear-site-data"),
        HeaderValue::from_static(CLEAR_SITE_DATA),
    )
}
