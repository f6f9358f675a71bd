//! Session-bound CSRF tokens for state-changing forms.
//!
//! Each session carries one random token. Forms embed it as a hidden field
//! and handlers call [`verify`] before acting on a POST.

use rand::Rng;
use rand::distr::Alphanumeric;
use tower_sessions::Session;

use crate::models::session::keys;

const TOKEN_LENGTH: usize = 32;

/// Get the session's CSRF token, generating one on first use.
pub async fn token(session: &Session) -> String {
    if let Ok(Some(existing)) = session.get::<String>(keys::CSRF_TOKEN).await {
        return existing;
    }

    let fresh = generate();
    if let Err(e) = session.insert(keys::CSRF_TOKEN, fresh.clone()).await {
        tracing::debug!(error = %e, "Failed to store CSRF token in session");
    }
    fresh
}

/// Check a submitted token against the session's token.
///
/// Fails closed: a session without a token rejects every submission.
pub async fn verify(session: &Session, submitted: &str) -> bool {
    let Ok(Some(expected)) = session.get::<String>(keys::CSRF_TOKEN).await else {
        return false;
    };
    constant_time_eq(expected.as_bytes(), submitted.as_bytes())
}

fn generate() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Byte comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_unique() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abcd", b"abc"));
        assert!(constant_time_eq(b"", b""));
    }
}
