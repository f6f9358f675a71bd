//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::services::email::{Mailer, NotificationDispatcher};
use crate::services::throttle::LoginThrottle;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    notifier: NotificationDispatcher,
    login_throttle: LoginThrottle,
}

impl AppState {
    /// Create a new application state.
    ///
    /// SMTP misconfiguration is downgraded to a warning: the site stays up
    /// and the contact form keeps persisting messages without notifications.
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool) -> Self {
        let mailer = match Mailer::new(&config.mail) {
            Ok(mailer) => Some(mailer),
            Err(e) => {
                tracing::warn!(error = %e, "SMTP transport unavailable, notifications disabled");
                None
            }
        };
        let notifier =
            NotificationDispatcher::new(mailer, config.mail.contact_recipient.clone());
        let login_throttle = LoginThrottle::new(config.login_throttle);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                notifier,
                login_throttle,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the contact notification dispatcher.
    #[must_use]
    pub fn notifier(&self) -> &NotificationDispatcher {
        &self.inner.notifier
    }

    /// Get a reference to the login throttle.
    #[must_use]
    pub fn login_throttle(&self) -> &LoginThrottle {
        &self.inner.login_throttle
    }
}
