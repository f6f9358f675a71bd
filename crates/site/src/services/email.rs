//! Email delivery for contact notifications.
//!
//! Uses SMTP via lettre. Delivery is fire-and-forget: the dispatcher spawns
//! a task per notification and a failed send is logged, never retried. The
//! message itself is already persisted, so a lost email is recoverable from
//! the admin inbox.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::MailConfig;
use crate::services::contact::{ContactNotification, ContactNotifier};

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// SMTP mailer for outbound notifications.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    /// Create a mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &MailConfig) -> Result<Self, SmtpError> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
        }
        .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
        })
    }

    /// Send a contact notification to the site owner.
    ///
    /// Reply-To is set to the visitor's address so the owner can answer
    /// directly from their mail client.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or delivery fails.
    pub async fn send_contact_notification(
        &self,
        recipient: &str,
        notification: &ContactNotification,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| EmailError::InvalidAddress(recipient.to_string()))?)
            .reply_to(
                notification
                    .email
                    .as_str()
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(notification.email.to_string()))?,
            )
            .subject(format!("New contact message from {}", notification.name))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "From: {} <{}>\n\n{}",
                notification.name, notification.email, notification.message
            ))?;

        self.transport.send(email).await?;

        tracing::info!(to = %recipient, "Contact notification sent");
        Ok(())
    }
}

/// Fire-and-forget dispatcher used by the contact pipeline.
///
/// Holds an optional mailer: when SMTP is unavailable at startup the site
/// still runs and accepts messages, it just logs instead of sending.
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Option<Mailer>,
    recipient: String,
}

impl NotificationDispatcher {
    /// Create a dispatcher delivering to `recipient`.
    #[must_use]
    pub const fn new(mailer: Option<Mailer>, recipient: String) -> Self {
        Self { mailer, recipient }
    }
}

impl ContactNotifier for NotificationDispatcher {
    fn dispatch(&self, notification: ContactNotification) {
        let Some(mailer) = self.mailer.clone() else {
            tracing::warn!(
                from = %notification.email,
                "SMTP not configured, skipping contact notification"
            );
            return;
        };
        let recipient = self.recipient.clone();

        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_contact_notification(&recipient, &notification)
                .await
            {
                // One attempt only; the message is already in the database
                tracing::error!(
                    to = %recipient,
                    from = %notification.email,
                    preview = %notification.preview(),
                    error = %e,
                    "Failed to send contact notification"
                );
            }
        });
    }
}
