//! Core types for the portfolio site.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod locale;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use locale::Locale;
pub use slug::{Slug, SlugError};
