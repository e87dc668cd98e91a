//! Cookie Management Infrastructure
//!
//! A [`CookiePolicy`] is the single attribute set for the session cookie.
//! Issuance and removal are both derived from it: browsers silently ignore a
//! removal whose `SameSite`/`Secure`/`Path` differ from the issued cookie.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar};

pub use axum_extra::extract::cookie::SameSite;

use crate::config::Environment;

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    /// `None` leaves a browser-session cookie
    pub max_age_secs: Option<i64>,
}

impl CookiePolicy {
    /// Production: `Secure; SameSite=None` (cross-site frontend).
    /// Development: not secure, `SameSite=Strict`.
    pub fn for_environment(name: impl Into<String>, environment: Environment) -> Self {
        let (secure, same_site) = if environment.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Strict)
        };

        Self {
            name: name.into(),
            secure,
            http_only: true,
            same_site,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }

    pub fn with_max_age_secs(mut self, secs: i64) -> Self {
        self.max_age_secs = Some(secs);
        self
    }

    /// Cookie carrying `value`
    pub fn issue(&self, value: impl Into<String>) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), value.into()))
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .path(self.path.clone());

        if let Some(secs) = self.max_age_secs {
            builder = builder.max_age(time::Duration::seconds(secs));
        }

        builder.build()
    }

    /// Expired, empty cookie with the issuance attributes
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.issue(String::new());
        cookie.make_removal();
        cookie
    }
}

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[test]
    fn test_production_attributes() {
        let policy = CookiePolicy::for_environment("token", Environment::Production);
        let cookie = policy.issue("abc");

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_development_attributes() {
        let policy = CookiePolicy::for_environment("token", Environment::Development);
        let rendered = policy.issue("abc").to_string();

        assert!(rendered.starts_with("token=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_removal_keeps_issuance_attributes() {
        for env in [Environment::Production, Environment::Development] {
            let policy = CookiePolicy::for_environment("token", env);
            let issued = policy.issue("abc");
            let removal = policy.removal();

            assert_eq!(removal.value(), "");
            assert_eq!(removal.http_only(), issued.http_only());
            assert_eq!(removal.secure(), issued.secure());
            assert_eq!(removal.same_site(), issued.same_site());
            assert_eq!(removal.path(), issued.path());
            assert!(removal.to_string().contains("Max-Age=0"));
        }
    }

    #[test]
    fn test_max_age() {
        let policy = CookiePolicy::for_environment("token", Environment::Development);
        assert!(!policy.issue("abc").to_string().contains("Max-Age"));

        let policy = policy.with_max_age_secs(3600);
        assert!(policy.issue("abc").to_string().contains("Max-Age=3600"));
        // Removal always expires immediately
        assert!(policy.removal().to_string().contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; token=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "token"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(extract_cookie(&headers, "token"), None);
    }
}
