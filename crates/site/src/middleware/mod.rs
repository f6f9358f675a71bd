//! Middleware: authentication extractors, sessions, security headers.

pub mod auth;
pub mod security_headers;
pub mod session;

pub use auth::RequireAdmin;
pub use security_headers::security_headers;
pub use session::create_session_layer;
