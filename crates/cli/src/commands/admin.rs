//! Admin account management commands.
//!
//! # Environment Variables (bootstrap)
//!
//! - `ADMIN_EMAIL` - email for the provisioned admin account
//! - `ADMIN_PASSWORD` - password for the provisioned admin account
//! - `ADMIN_NAME` - display name (defaults to "Admin")

use portfolio_site::services::AuthService;

use super::CommandError;

/// Provision the admin account from environment variables.
///
/// Idempotent: running it again refreshes the name and password of the
/// existing account instead of failing, so it is safe in deploy scripts.
///
/// # Errors
///
/// Returns `CommandError` if environment variables are missing, the inputs
/// fail validation, or the database is unreachable.
pub async fn bootstrap() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let email =
        std::env::var("ADMIN_EMAIL").map_err(|_| CommandError::MissingEnvVar("ADMIN_EMAIL"))?;
    let password = std::env::var("ADMIN_PASSWORD")
        .map_err(|_| CommandError::MissingEnvVar("ADMIN_PASSWORD"))?;
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_owned());

    let pool = super::connect().await?;

    let user = AuthService::new(&pool)
        .provision_admin(&email, &name, &password)
        .await?;

    tracing::info!("Admin account provisioned. ID: {}, Email: {}", user.id, user.email);
    Ok(())
}

/// Create a new admin account, failing if the email is already registered.
///
/// # Errors
///
/// Returns `CommandError` if the inputs fail validation, the email is taken,
/// or the database is unreachable.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let user = AuthService::new(&pool)
        .create_admin(email, name, password)
        .await?;

    tracing::info!("Admin account created. ID: {}, Email: {}", user.id, user.email);
    Ok(())
}
