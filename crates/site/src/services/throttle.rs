//! Per-IP throttling of admin login attempts.
//!
//! Uses a process-local keyed rate limiter: counts are not shared across
//! instances and reset on restart, which is acceptable for blunting
//! brute-force attempts against a single-owner admin panel.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

use axum::http::HeaderMap;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};

use crate::config::ThrottleConfig;

/// Proxy headers consulted for the client IP, in order of preference.
const CLIENT_IP_HEADERS: &[&str] = &["fly-client-ip", "x-forwarded-for", "x-real-ip"];

/// Keyed rate limiter for login attempts.
pub struct LoginThrottle {
    limiter: RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>,
}

impl LoginThrottle {
    /// Create a throttle allowing `attempts` per `window` per client IP.
    ///
    /// The quota is a leaky-bucket shape: a full burst of `attempts` is
    /// available immediately, replenishing one attempt per `window /
    /// attempts`.
    #[must_use]
    pub fn new(config: ThrottleConfig) -> Self {
        let attempts = NonZeroU32::new(config.attempts.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let period = config.window / attempts.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_minute(NonZeroU32::MIN))
            .allow_burst(attempts);

        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Record an attempt from `ip` and report whether it is allowed.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.limiter.check_key(&ip).is_ok()
    }
}

/// Resolve the client IP for a request.
///
/// Checks proxy headers first (the site runs behind a reverse proxy in
/// production) and falls back to the socket peer address. A spoofed header
/// only lets an attacker throttle their own made-up key.
#[must_use]
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
    for header in CLIENT_IP_HEADERS {
        if let Some(value) = headers.get(*header)
            && let Ok(value) = value.to_str()
            && let Some(first) = value.split(',').next()
            && let Ok(ip) = first.trim().parse::<IpAddr>()
        {
            return ip;
        }
    }
    peer.ip()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn throttle(attempts: u32, window: Duration) -> LoginThrottle {
        LoginThrottle::new(ThrottleConfig { attempts, window })
    }

    #[test]
    fn test_allows_burst_then_blocks() {
        let throttle = throttle(3, Duration::from_secs(600));
        let ip: IpAddr = "203.0.113.7".parse().unwrap();

        assert!(throttle.check(ip));
        assert!(throttle.check(ip));
        assert!(throttle.check(ip));
        assert!(!throttle.check(ip));
    }

    #[test]
    fn test_keys_are_independent() {
        let throttle = throttle(1, Duration::from_secs(600));
        let first: IpAddr = "203.0.113.7".parse().unwrap();
        let second: IpAddr = "203.0.113.8".parse().unwrap();

        assert!(throttle.check(first));
        assert!(!throttle.check(first));
        assert!(throttle.check(second));
    }

    #[test]
    fn test_replenishes_after_window() {
        let throttle = throttle(2, Duration::from_millis(100));
        let ip: IpAddr = "203.0.113.9".parse().unwrap();

        assert!(throttle.check(ip));
        assert!(throttle.check(ip));
        assert!(!throttle.check(ip));

        std::thread::sleep(Duration::from_millis(150));
        assert!(throttle.check(ip));
    }

    #[test]
    fn test_client_ip_prefers_proxy_headers() {
        let peer: SocketAddr = "10.0.0.1:55555".parse().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.4, 10.0.0.1".parse().unwrap());
        assert_eq!(
            client_ip(&headers, peer),
            "198.51.100.4".parse::<IpAddr>().unwrap()
        );

        let mut headers = HeaderMap::new();
        headers.insert("fly-client-ip", "198.51.100.9".parse().unwrap());
        assert_eq!(
            client_ip(&headers, peer),
            "198.51.100.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let peer: SocketAddr = "10.0.0.1:55555".parse().unwrap();

        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer), "10.0.0.1".parse::<IpAddr>().unwrap());

        // Garbage header values are ignored
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "not-an-ip".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), "10.0.0.1".parse::<IpAddr>().unwrap());
    }
}
