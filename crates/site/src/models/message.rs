//! Contact message model.

use chrono::{DateTime, Utc};

use portfolio_core::{Email, MessageId};

/// A message submitted through the contact form.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    /// Message's database ID.
    pub id: MessageId,
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: Email,
    /// Message body.
    pub message: String,
    /// Whether the owner has marked this message as handled.
    pub processed: bool,
    /// When the message was received.
    pub created_at: DateTime<Utc>,
    /// When the message was last updated.
    pub updated_at: DateTime<Utc>,
}
