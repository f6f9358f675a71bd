//! Business logic services.

pub mod auth;
pub mod contact;
pub mod email;
pub mod throttle;

pub use auth::{AuthError, AuthService};
pub use contact::{ContactNotifier, ContactPipeline, ContactStore, SubmissionOutcome};
pub use email::{Mailer, NotificationDispatcher};
pub use throttle::LoginThrottle;
