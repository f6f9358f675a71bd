//! User model.

use chrono::{DateTime, Utc};

use portfolio_core::{Email, UserId};

/// A registered user.
///
/// The password hash is deliberately not part of this type; it only leaves
/// the `users` table through [`crate::db::UserRepository::get_with_password_hash`].
#[derive(Debug, Clone)]
pub struct User {
    /// User's database ID.
    pub id: UserId,
    /// User's email address (unique).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Whether this user may access the admin panel.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
