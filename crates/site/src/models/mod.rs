//! Domain models for the portfolio site.

pub mod message;
pub mod project;
pub mod session;
pub mod user;

pub use message::ContactMessage;
pub use project::{NewProject, Project};
pub use session::CurrentUser;
pub use user::User;
