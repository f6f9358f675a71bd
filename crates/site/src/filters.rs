//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Utc};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a UTC timestamp for display (e.g., "2026-08-24 14:03").
///
/// Usage in templates: `{{ message.created_at|format_datetime }}`
#[askama::filter_fn]
pub fn format_datetime(
    value: &DateTime<Utc>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format_ts(value))
}

fn format_ts(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_ts() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 24, 14, 3, 0).unwrap();
        assert_eq!(format_ts(&ts), "2026-08-24 14:03");
    }
}
