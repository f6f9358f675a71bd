//! Contact message repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portfolio_core::{Email, MessageId};

use super::RepositoryError;
use crate::models::ContactMessage;

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i32,
    name: String,
    email: String,
    message: String,
    processed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for ContactMessage {
    type Error = RepositoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: MessageId::new(row.id),
            name: row.name,
            email,
            message: row.message,
            processed: row.processed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const MESSAGE_COLUMNS: &str = "id, name, email, message, processed, created_at, updated_at";

/// Repository for contact message database operations.
pub struct ContactMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactMessageRepository<'a> {
    /// Create a new contact message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new contact message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        message: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "INSERT INTO contact_messages (name, email, message)
             VALUES ($1, $2, $3)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        ContactMessage::try_from(row)
    }

    /// Whether a message with the same sender email and identical body was
    /// received at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn duplicate_exists_since(
        &self,
        email: &Email,
        message: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM contact_messages
                 WHERE email = $1 AND message = $2 AND created_at >= $3
             )",
        )
        .bind(email.as_str())
        .bind(message)
        .bind(since)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// List all messages for the admin inbox.
    ///
    /// Unprocessed messages sort first; within each group, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages
             ORDER BY processed ASC, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    /// Flip the processed flag on a message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no message has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn toggle_processed(&self, id: MessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE contact_messages
             SET processed = NOT processed, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no message has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: MessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
