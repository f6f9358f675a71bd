//! UI locale for the bilingual site.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Supported UI languages.
///
/// The site ships with English (default) and Spanish translations. Locale
/// resolution is request-scoped: handlers read the session value and pass the
/// resolved locale explicitly into rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Parse a locale from a language code.
    ///
    /// Returns `None` for unsupported codes; callers keep the current locale
    /// in that case rather than erroring.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// The two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Whether this is the Spanish locale.
    #[must_use]
    pub const fn is_spanish(self) -> bool {
        matches!(self, Self::Es)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("en"), Some(Locale::En));
        assert_eq!(Locale::from_code("es"), Some(Locale::Es));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::from_code("EN"), None);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn test_code_roundtrip() {
        for locale in [Locale::En, Locale::Es] {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
    }
}
