//! Contact form intake pipeline.
//!
//! A submission moves through fixed stages: structural validation, honeypot
//! check, duplicate suppression, persistence, then notification dispatch.
//! Rejections for spam and duplicates are silent: the visitor sees the same
//! confirmation as an accepted submission, so the form cannot be used to
//! probe which checks fired.

use chrono::{Duration, Utc};

use portfolio_core::Email;

use crate::db::{ContactMessageRepository, RepositoryError};
use crate::models::ContactMessage;

/// Maximum sender name length.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum message body length.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Window within which an identical (email, message) pair is a duplicate.
pub const DUPLICATE_WINDOW_SECS: i64 = 120;

/// Raw contact form input, before validation.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Message body.
    pub message: String,
    /// Honeypot field; humans never see it, so any value marks a bot.
    pub honeypot: String,
}

/// Field-level validation errors, keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Error for the name field.
    pub name: Option<String>,
    /// Error for the email field.
    pub email: Option<String>,
    /// Error for the message field.
    pub message: Option<String>,
}

impl FieldErrors {
    /// Whether any field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Terminal state of a submission that did not hit an infrastructure error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Message persisted, notification dispatched.
    Accepted,
    /// Honeypot tripped. Nothing persisted; the visitor still sees success.
    RejectedSpam,
    /// Identical message from the same sender within the window. Nothing
    /// persisted; the visitor still sees success.
    RejectedDuplicate,
    /// Structural validation failed; the form is redisplayed with errors.
    RejectedInvalid(FieldErrors),
}

impl SubmissionOutcome {
    /// Whether the visitor should see the uniform confirmation message.
    #[must_use]
    pub const fn shows_confirmation(&self) -> bool {
        !matches!(self, Self::RejectedInvalid(_))
    }
}

/// Notification payload handed to the dispatcher after persistence.
#[derive(Debug, Clone)]
pub struct ContactNotification {
    /// Sender's name.
    pub name: String,
    /// Sender's email (used as Reply-To).
    pub email: Email,
    /// Full message body.
    pub message: String,
}

impl ContactNotification {
    /// Short body preview for log lines.
    #[must_use]
    pub fn preview(&self) -> &str {
        let end = self
            .message
            .char_indices()
            .map(|(i, _)| i)
            .nth(80)
            .unwrap_or(self.message.len());
        self.message.get(..end).unwrap_or(&self.message)
    }
}

/// Storage operations the pipeline needs.
///
/// Implemented by [`ContactMessageRepository`] in production and by an
/// in-memory store in tests.
pub trait ContactStore {
    /// Whether an identical (email, message) pair exists at or after `since`.
    fn duplicate_exists_since(
        &self,
        email: &Email,
        message: &str,
        since: chrono::DateTime<Utc>,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Persist a validated message.
    fn insert_message(
        &self,
        name: &str,
        email: &Email,
        message: &str,
    ) -> impl Future<Output = Result<ContactMessage, RepositoryError>> + Send;
}

impl ContactStore for ContactMessageRepository<'_> {
    async fn duplicate_exists_since(
        &self,
        email: &Email,
        message: &str,
        since: chrono::DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        Self::duplicate_exists_since(self, email, message, since).await
    }

    async fn insert_message(
        &self,
        name: &str,
        email: &Email,
        message: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        self.create(name, email, message).await
    }
}

/// Fire-and-forget notification dispatch.
///
/// `dispatch` must not block: the pipeline's accepted path returns to the
/// visitor without waiting for delivery.
pub trait ContactNotifier {
    /// Hand off a notification for asynchronous delivery.
    fn dispatch(&self, notification: ContactNotification);
}

/// The contact intake pipeline.
pub struct ContactPipeline<'a, S, N> {
    store: &'a S,
    notifier: &'a N,
}

impl<'a, S: ContactStore, N: ContactNotifier> ContactPipeline<'a, S, N> {
    /// Create a pipeline over a store and a notifier.
    #[must_use]
    pub const fn new(store: &'a S, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    /// Run a submission through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for infrastructure failures (duplicate
    /// probe or insert); every policy decision is a [`SubmissionOutcome`].
    pub async fn submit(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionOutcome, RepositoryError> {
        let name = submission.name.trim();
        let message = submission.message.trim();

        let mut errors = FieldErrors::default();
        if name.is_empty() {
            errors.name = Some("Please enter your name.".to_string());
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.name = Some(format!("Name must be at most {MAX_NAME_LENGTH} characters."));
        }

        let email = match Email::parse(&submission.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.email = Some(e.to_string());
                None
            }
        };

        if message.is_empty() {
            errors.message = Some("Please enter a message.".to_string());
        } else if message.chars().count() > MAX_MESSAGE_LENGTH {
            errors.message = Some(format!(
                "Message must be at most {MAX_MESSAGE_LENGTH} characters."
            ));
        }

        if !errors.is_empty() {
            return Ok(SubmissionOutcome::RejectedInvalid(errors));
        }
        // errors is empty, so email parsing succeeded
        let Some(email) = email else {
            return Ok(SubmissionOutcome::RejectedInvalid(errors));
        };

        // Checked untrimmed: browsers never populate this field, so even
        // whitespace marks an automated submission.
        if !submission.honeypot.is_empty() {
            tracing::info!("Contact submission dropped: honeypot field was filled");
            return Ok(SubmissionOutcome::RejectedSpam);
        }

        let since = Utc::now() - Duration::seconds(DUPLICATE_WINDOW_SECS);
        if self.store.duplicate_exists_since(&email, message, since).await? {
            tracing::info!(email = %email, "Contact submission dropped: duplicate within window");
            return Ok(SubmissionOutcome::RejectedDuplicate);
        }

        let saved = self.store.insert_message(name, &email, message).await?;
        tracing::info!(message_id = %saved.id, "Contact message received");

        self.notifier.dispatch(ContactNotification {
            name: saved.name,
            email: saved.email,
            message: saved.message,
        });

        Ok(SubmissionOutcome::Accepted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    use portfolio_core::MessageId;

    use super::*;

    #[derive(Default)]
    struct InMemoryStore {
        messages: Mutex<Vec<ContactMessage>>,
        fail_insert: bool,
    }

    impl InMemoryStore {
        fn with_message(email: &str, message: &str, created_at: DateTime<Utc>) -> Self {
            let store = Self::default();
            store.messages.lock().unwrap().push(ContactMessage {
                id: MessageId::new(1),
                name: "Earlier Sender".to_string(),
                email: Email::parse(email).unwrap(),
                message: message.to_string(),
                processed: false,
                created_at,
                updated_at: created_at,
            });
            store
        }

        fn len(&self) -> usize {
            self.messages.lock().unwrap().len()
        }
    }

    impl ContactStore for InMemoryStore {
        async fn duplicate_exists_since(
            &self,
            email: &Email,
            message: &str,
            since: DateTime<Utc>,
        ) -> Result<bool, RepositoryError> {
            Ok(self.messages.lock().unwrap().iter().any(|m| {
                m.email == *email && m.message == message && m.created_at >= since
            }))
        }

        async fn insert_message(
            &self,
            name: &str,
            email: &Email,
            message: &str,
        ) -> Result<ContactMessage, RepositoryError> {
            if self.fail_insert {
                return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
            }
            let mut messages = self.messages.lock().unwrap();
            let now = Utc::now();
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let saved = ContactMessage {
                id: MessageId::new(messages.len() as i32 + 1),
                name: name.to_string(),
                email: email.clone(),
                message: message.to_string(),
                processed: false,
                created_at: now,
                updated_at: now,
            };
            messages.push(saved.clone());
            Ok(saved)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<ContactNotification>>,
    }

    impl RecordingNotifier {
        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl ContactNotifier for RecordingNotifier {
        fn dispatch(&self, notification: ContactNotification) {
            self.sent.lock().unwrap().push(notification);
        }
    }

    fn valid_submission() -> Submission {
        Submission {
            name: "Jane Visitor".to_string(),
            email: "jane@example.com".to_string(),
            message: "Hello, I'd like to talk about a project.".to_string(),
            honeypot: String::new(),
        }
    }

    #[tokio::test]
    async fn test_accepts_valid_submission() {
        let store = InMemoryStore::default();
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline.submit(&valid_submission()).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::Accepted);
        assert!(outcome.shows_confirmation());
        assert_eq!(store.len(), 1);
        assert_eq!(notifier.sent_count(), 1);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent[0].email.as_str(), "jane@example.com");
    }

    #[tokio::test]
    async fn test_rejects_missing_fields_without_persisting() {
        let store = InMemoryStore::default();
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline
            .submit(&Submission {
                name: "   ".to_string(),
                email: "not-an-email".to_string(),
                message: String::new(),
                honeypot: String::new(),
            })
            .await
            .unwrap();

        let SubmissionOutcome::RejectedInvalid(errors) = outcome else {
            panic!("expected RejectedInvalid, got {outcome:?}");
        };
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.message.is_some());
        assert_eq!(store.len(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_overlong_fields() {
        let store = InMemoryStore::default();
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline
            .submit(&Submission {
                name: "n".repeat(MAX_NAME_LENGTH + 1),
                email: "jane@example.com".to_string(),
                message: "m".repeat(MAX_MESSAGE_LENGTH + 1),
                honeypot: String::new(),
            })
            .await
            .unwrap();

        let SubmissionOutcome::RejectedInvalid(errors) = outcome else {
            panic!("expected RejectedInvalid, got {outcome:?}");
        };
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
        assert!(errors.message.is_some());
    }

    #[tokio::test]
    async fn test_honeypot_drops_silently() {
        let store = InMemoryStore::default();
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let mut submission = valid_submission();
        submission.honeypot = "Nick".to_string();
        let outcome = pipeline.submit(&submission).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::RejectedSpam);
        // Indistinguishable from success for the caller's rendering path
        assert!(outcome.shows_confirmation());
        assert_eq!(store.len(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_only_honeypot_drops_silently() {
        let store = InMemoryStore::default();
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let mut submission = valid_submission();
        submission.honeypot = "   ".to_string();
        let outcome = pipeline.submit(&submission).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::RejectedSpam);
        assert!(outcome.shows_confirmation());
        assert_eq!(store.len(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_within_window_dropped() {
        let store = InMemoryStore::with_message(
            "jane@example.com",
            "Hello, I'd like to talk about a project.",
            Utc::now() - Duration::seconds(30),
        );
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline.submit(&valid_submission()).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::RejectedDuplicate);
        assert!(outcome.shows_confirmation());
        assert_eq!(store.len(), 1);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_outside_window_accepted() {
        let store = InMemoryStore::with_message(
            "jane@example.com",
            "Hello, I'd like to talk about a project.",
            Utc::now() - Duration::seconds(DUPLICATE_WINDOW_SECS + 30),
        );
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline.submit(&valid_submission()).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::Accepted);
        assert_eq!(store.len(), 2);
        assert_eq!(notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_same_message_different_sender_accepted() {
        let store = InMemoryStore::with_message(
            "other@example.com",
            "Hello, I'd like to talk about a project.",
            Utc::now() - Duration::seconds(30),
        );
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline.submit(&valid_submission()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Accepted);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_failure_propagates_without_notification() {
        let store = InMemoryStore {
            fail_insert: true,
            ..InMemoryStore::default()
        };
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let result = pipeline.submit(&valid_submission()).await;

        assert!(result.is_err());
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_trims_whitespace_before_validation() {
        let store = InMemoryStore::default();
        let notifier = RecordingNotifier::default();
        let pipeline = ContactPipeline::new(&store, &notifier);

        let outcome = pipeline
            .submit(&Submission {
                name: "  Jane Visitor  ".to_string(),
                email: "  jane@example.com  ".to_string(),
                message: "  Trimmed message body.  ".to_string(),
                honeypot: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::Accepted);
        let messages = store.messages.lock().unwrap();
        assert_eq!(messages[0].name, "Jane Visitor");
        assert_eq!(messages[0].message, "Trimmed message body.");
    }

    #[test]
    fn test_notification_preview_truncates() {
        let notification = ContactNotification {
            name: "Jane".to_string(),
            email: Email::parse("jane@example.com").unwrap(),
            message: "x".repeat(200),
        };
        assert_eq!(notification.preview().len(), 80);

        let short = ContactNotification {
            name: "Jane".to_string(),
            email: Email::parse("jane@example.com").unwrap(),
            message: "short".to_string(),
        };
        assert_eq!(short.preview(), "short");
    }
}
