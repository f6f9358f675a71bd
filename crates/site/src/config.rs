//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `BASE_URL` - Public URL for the site (e.g., <https://example.com>)
//! - `SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `MAIL_SERVER` - SMTP server hostname
//! - `MAIL_DEFAULT_SENDER` - Email sender address (From header)
//! - `CONTACT_RECIPIENT` - Address that receives contact notifications
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `MAIL_PORT` - SMTP port (default: 587)
//! - `MAIL_USERNAME` / `MAIL_PASSWORD` - SMTP credentials (set together)
//! - `MAIL_USE_TLS` - Use STARTTLS for SMTP (default: true)
//! - `ADMIN_LOGIN_PATH` - Path of the admin login page (default: /admin/login)
//! - `LOGIN_THROTTLE_ATTEMPTS` - Allowed login attempts per window (default: 5)
//! - `LOGIN_THROTTLE_WINDOW_SECS` - Throttle window in seconds (default: 600)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// SMTP configuration for contact notifications
    pub mail: MailConfig,
    /// Path the admin login page is served from
    pub admin_login_path: String,
    /// Login throttle configuration
    pub login_throttle: ThrottleConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Email (SMTP) configuration for outbound contact notifications.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP server hostname
    pub server: String,
    /// SMTP server port
    pub port: u16,
    /// SMTP authentication username (optional, set together with password)
    pub username: Option<String>,
    /// SMTP authentication password
    pub password: Option<SecretString>,
    /// Whether to use STARTTLS
    pub use_tls: bool,
    /// Email sender address (From header)
    pub from_address: String,
    /// Address that receives contact-form notifications
    pub contact_recipient: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("use_tls", &self.use_tls)
            .field("from_address", &self.from_address)
            .field("contact_recipient", &self.contact_recipient)
            .finish()
    }
}

/// Per-IP login throttle configuration.
#[derive(Debug, Clone, Copy)]
pub struct ThrottleConfig {
    /// Allowed attempts per window per client IP
    pub attempts: u32,
    /// Window length
    pub window: Duration,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_secret("DATABASE_URL")?;
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("BASE_URL")?;
        let session_secret = get_validated_secret("SESSION_SECRET")?;
        validate_session_secret(&session_secret, "SESSION_SECRET")?;

        let mail = MailConfig::from_env()?;
        let admin_login_path =
            sanitize_login_path(get_optional_env("ADMIN_LOGIN_PATH").as_deref());
        let login_throttle = ThrottleConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            mail,
            admin_login_path,
            login_throttle,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (drives the Secure cookie flag).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = get_env_or_default("MAIL_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAIL_PORT".to_string(), e.to_string()))?;

        let username = get_optional_env("MAIL_USERNAME");
        let password = get_optional_env("MAIL_PASSWORD");
        let (username, password) = match (username, password) {
            (Some(user), Some(pass)) => (Some(user), Some(SecretString::from(pass))),
            (None, None) => (None, None),
            _ => {
                return Err(ConfigError::InvalidEnvVar(
                    "MAIL_*".to_string(),
                    "Both MAIL_USERNAME and MAIL_PASSWORD must be set together".to_string(),
                ));
            }
        };

        Ok(Self {
            server: get_required_env("MAIL_SERVER")?,
            port,
            username,
            password,
            use_tls: parse_bool(&get_env_or_default("MAIL_USE_TLS", "true")),
            from_address: get_required_env("MAIL_DEFAULT_SENDER")?,
            contact_recipient: get_required_env("CONTACT_RECIPIENT")?,
        })
    }
}

impl ThrottleConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let attempts = get_env_or_default("LOGIN_THROTTLE_ATTEMPTS", "5")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LOGIN_THROTTLE_ATTEMPTS".to_string(), e.to_string())
            })?;
        if attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "LOGIN_THROTTLE_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let window_secs = get_env_or_default("LOGIN_THROTTLE_WINDOW_SECS", "600")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LOGIN_THROTTLE_WINDOW_SECS".to_string(), e.to_string())
            })?;
        if window_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "LOGIN_THROTTLE_WINDOW_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            attempts,
            window: Duration::from_secs(window_secs),
        })
    }
}

/// Normalize a configured admin login path.
///
/// Backslashes are treated as path separators (some deployment dashboards
/// mangle pasted paths), the value must start with `/`, and colons are
/// rejected because they would break route registration. Invalid values fall
/// back to the default path rather than failing startup.
fn sanitize_login_path(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return DEFAULT_ADMIN_LOGIN_PATH.to_string();
    };

    let cleaned = raw.trim().replace('\\', "/");
    if cleaned.is_empty() {
        return DEFAULT_ADMIN_LOGIN_PATH.to_string();
    }
    if !cleaned.starts_with('/') || cleaned.contains(':') {
        tracing::warn!(
            path = %cleaned,
            "Ignoring invalid ADMIN_LOGIN_PATH, using default"
        );
        return DEFAULT_ADMIN_LOGIN_PATH.to_string();
    }
    cleaned
}

/// Parse a boolean-ish environment value.
///
/// Accepts `true`/`1`/`yes`/`on` (case-insensitive); everything else is false.
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like signing keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Random-looking string should have high entropy
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-session-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_validate_session_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_ok());
    }

    #[test]
    fn test_sanitize_login_path_default() {
        assert_eq!(sanitize_login_path(None), "/admin/login");
        assert_eq!(sanitize_login_path(Some("")), "/admin/login");
        assert_eq!(sanitize_login_path(Some("   ")), "/admin/login");
    }

    #[test]
    fn test_sanitize_login_path_custom() {
        assert_eq!(sanitize_login_path(Some("/panel-entrance")), "/panel-entrance");
    }

    #[test]
    fn test_sanitize_login_path_normalizes_backslashes() {
        assert_eq!(sanitize_login_path(Some("\\hidden\\door")), "/hidden/door");
    }

    #[test]
    fn test_sanitize_login_path_rejects_relative_and_colons() {
        assert_eq!(sanitize_login_path(Some("no-leading-slash")), "/admin/login");
        assert_eq!(sanitize_login_path(Some("/has:colon")), "/admin/login");
    }

    #[test]
    fn test_parse_bool() {
        for truthy in ["true", "TRUE", "1", "yes", "On", " true "] {
            assert!(parse_bool(truthy), "{truthy} should parse as true");
        }
        for falsy in ["false", "0", "no", "off", "", "maybe"] {
            assert!(!parse_bool(falsy), "{falsy} should parse as false");
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            mail: MailConfig {
                server: "smtp.test.com".to_string(),
                port: 587,
                username: Some("user".to_string()),
                password: Some(SecretString::from("pass")),
                use_tls: true,
                from_address: "noreply@test.com".to_string(),
                contact_recipient: "inbox@test.com".to_string(),
            },
            admin_login_path: "/admin/login".to_string(),
            login_throttle: ThrottleConfig {
                attempts: 5,
                window: Duration::from_secs(600),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_https());
    }

    #[test]
    fn test_mail_config_debug_redacts_secrets() {
        let config = MailConfig {
            server: "smtp.test.com".to_string(),
            port: 587,
            username: Some("mailer@test.com".to_string()),
            password: Some(SecretString::from("super_secret_smtp_password")),
            use_tls: true,
            from_address: "noreply@test.com".to_string(),
            contact_recipient: "inbox@test.com".to_string(),
        };

        let debug_output = format!("{config:?}");

        // Public fields should be visible
        assert!(debug_output.contains("smtp.test.com"));
        assert!(debug_output.contains("587"));
        assert!(debug_output.contains("mailer@test.com"));

        // Secret fields should be redacted
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_smtp_password"));
    }
}
