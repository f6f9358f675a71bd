//! One-shot flash messages stored in the session.
//!
//! Messages queue up across redirects and are drained on the next page
//! render. Session write failures downgrade to a debug log; losing a flash
//! is cosmetic.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session::keys;

/// Visual severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Danger,
}

/// A queued flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Visual severity.
    pub level: Level,
    /// Message text, already localized by the caller.
    pub message: String,
}

impl Flash {
    /// CSS class for rendering.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            Level::Success => "flash-success",
            Level::Info => "flash-info",
            Level::Danger => "flash-danger",
        }
    }
}

/// Queue a flash message for the next rendered page.
pub async fn push(session: &Session, level: Level, message: impl Into<String>) {
    let mut queued: Vec<Flash> = session
        .get(keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    queued.push(Flash {
        level,
        message: message.into(),
    });
    if let Err(e) = session.insert(keys::FLASH, queued).await {
        tracing::debug!(error = %e, "Failed to queue flash message");
    }
}

/// Drain all queued flash messages.
pub async fn take(session: &Session) -> Vec<Flash> {
    session
        .remove::<Vec<Flash>>(keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_classes() {
        let flash = |level| Flash {
            level,
            message: String::new(),
        };
        assert_eq!(flash(Level::Success).css_class(), "flash-success");
        assert_eq!(flash(Level::Info).css_class(), "flash-info");
        assert_eq!(flash(Level::Danger).css_class(), "flash-danger");
    }

    #[test]
    fn test_flash_serde_roundtrip() {
        let flash = Flash {
            level: Level::Danger,
            message: "Invalid credentials".to_string(),
        };
        let json = serde_json::to_string(&flash).expect("serializable");
        let back: Flash = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, flash);
    }
}
