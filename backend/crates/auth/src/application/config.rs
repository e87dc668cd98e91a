//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::config::Environment;
use platform::cookie::CookiePolicy;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Name of the cookie carrying the signed credential
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Credential lifetime when none is configured
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Longest credential lifetime the binary accepts from configuration
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub environment: Environment,
    /// Attributes shared by the issued and the cleared cookie
    pub cookie: CookiePolicy,
    /// HS256 signing secret
    pub token_secret: Vec<u8>,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn for_environment(environment: Environment, token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            environment,
            cookie: CookiePolicy::for_environment(TOKEN_COOKIE_NAME, environment),
            token_secret: token_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
        .with_token_ttl(DEFAULT_TOKEN_TTL)
    }

    /// Development cookie attributes with a random per-process secret
    pub fn development() -> Self {
        Self::for_environment(Environment::Development, platform::crypto::random_bytes(32))
    }

    /// Also sets the cookie's `Max-Age`, so the browser drops the cookie
    /// when the credential expires
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        let max_age_secs = self.token_ttl_secs();
        self.cookie = self.cookie.with_max_age_secs(max_age_secs);
        self
    }

    /// Lifetime in seconds, saturating at `i64::MAX`
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}
