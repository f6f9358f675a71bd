//! Authentication service.
//!
//! Password verification for the admin panel. There is no public
//! registration; admin accounts are provisioned through the CLI.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use portfolio_core::{Email, EmailError};

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Minimum password length for provisioned accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair is wrong, or the account may not access the
    /// admin panel. Deliberately a single variant so responses cannot be
    /// used to probe which accounts exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Database error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Verify admin credentials for a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown, the
    /// password is wrong, or the account is not an admin. All three cases
    /// are indistinguishable to the caller.
    pub async fn verify_admin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let record = self.users.get_with_password_hash(email.trim()).await?;
        authenticate_admin(record, password)
    }

    /// Provision an admin account, updating it if the email already exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` if the
    /// inputs fail validation, or a repository error if the upsert fails.
    pub async fn provision_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self.users.upsert_admin(&email, name, &password_hash).await?;
        Ok(user)
    }

    /// Create a new admin account, failing if the email is taken.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_admin(&email, name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }
}

/// Check a looked-up credential record for an admin login.
///
/// Unknown email, wrong password and non-admin account all collapse into
/// `InvalidCredentials`.
fn authenticate_admin(
    record: Option<(User, String)>,
    password: &str,
) -> Result<User, AuthError> {
    let (user, password_hash) = record.ok_or(AuthError::InvalidCredentials)?;

    verify_password(password, &password_hash)?;

    if !user.is_admin {
        tracing::warn!(user_id = %user.id, "Non-admin account attempted admin login");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against an Argon2 hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use portfolio_core::UserId;

    use super::*;

    fn user_record(is_admin: bool, password: &str) -> (User, String) {
        let now = Utc::now();
        let user = User {
            id: UserId::new(7),
            email: Email::parse("admin@example.com").unwrap(),
            name: "Admin".to_string(),
            is_admin,
            created_at: now,
            updated_at: now,
        };
        (user, hash_password(password).unwrap())
    }

    #[test]
    fn test_authenticate_unknown_email_is_invalid_credentials() {
        let err = authenticate_admin(None, "whatever").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_wrong_password_is_invalid_credentials() {
        let record = user_record(true, "correct horse battery staple");
        let err = authenticate_admin(Some(record), "wrong password").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_non_admin_is_invalid_credentials() {
        // Right password, wrong role: still the same opaque error.
        let record = user_record(false, "correct horse battery staple");
        let err =
            authenticate_admin(Some(record), "correct horse battery staple").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_admin_succeeds() {
        let record = user_record(true, "correct horse battery staple");
        let user =
            authenticate_admin(Some(record), "correct horse battery staple").unwrap();
        assert!(user.is_admin);
        assert_eq!(user.email.as_str(), "admin@example.com");
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        let err = verify_password("wrong password", &hash).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_verify_garbage_hash() {
        let err = verify_password("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_validate_password_too_short() {
        let err = validate_password("short").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
