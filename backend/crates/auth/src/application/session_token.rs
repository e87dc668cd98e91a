//! Session Token Service
//!
//! Issues and verifies the signed credential carried by the `token` cookie.
//! Both operations are pure: nothing is persisted and verification never
//! performs I/O.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::AuthenticatedIdentity;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Claims encoded in the credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// A freshly signed credential
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl SessionTokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second after `exp`.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    pub fn issue(&self, email: &Email) -> AuthResult<IssuedToken> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a credential as if signed at `issued_at`
    pub fn issue_at(&self, email: &Email, issued_at: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let iat = issued_at.timestamp();
        let exp = iat.checked_add(self.ttl_secs).ok_or_else(|| {
            AuthError::Internal(format!("token lifetime overflows: {}s", self.ttl_secs))
        })?;
        let expires_at = timestamp_to_utc(exp)?;

        let claims = SessionClaims {
            email: email.as_str().to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

        tracing::debug!(email = %email, %expires_at, "Session token issued");

        Ok(IssuedToken { token, expires_at })
    }

    /// `UNVERIFIED -> VERIFIED`, or `Unauthenticated` for a bad signature,
    /// a past expiry or an unreadable identity claim.
    pub fn verify(&self, token: &str) -> AuthResult<AuthenticatedIdentity> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                tracing::debug!(error = %e, "Session token rejected");
                AuthError::Unauthenticated
            },
        )?;

        let claims = data.claims;
        let email = Email::new(claims.email).map_err(|_| AuthError::Unauthenticated)?;
        let expires_at = timestamp_to_utc(claims.exp).map_err(|_| AuthError::Unauthenticated)?;

        Ok(AuthenticatedIdentity::new(email, expires_at))
    }
}

fn timestamp_to_utc(secs: i64) -> AuthResult<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| AuthError::Internal(format!("timestamp out of range: {secs}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::MAX_TOKEN_TTL;
    use chrono::Duration;

    fn service() -> SessionTokenService {
        SessionTokenService::new(&AuthConfig::development())
    }

    #[test]
    fn test_issue_then_verify_keeps_email() {
        let tokens = service();
        let email = Email::new("a@x.com").unwrap();

        let issued = tokens.issue(&email).unwrap();
        let identity = tokens.verify(&issued.token).unwrap();

        assert_eq!(identity.email(), &email);
        assert_eq!(identity.expires_at(), issued.expires_at);
    }

    #[test]
    fn test_default_lifetime_is_one_day() {
        let tokens = service();
        let now = Utc::now();
        let issued = tokens.issue_at(&Email::new("a@x.com").unwrap(), now).unwrap();
        assert_eq!(issued.expires_at.timestamp(), now.timestamp() + 24 * 3600);
    }

    #[test]
    fn test_claim_is_kept_verbatim() {
        let tokens = service();
        let issued = tokens.issue(&Email::new("A@X.com").unwrap()).unwrap();
        assert_eq!(tokens.verify(&issued.token).unwrap().email().as_str(), "A@X.com");
    }

    #[test]
    fn test_unrepresentable_lifetime_fails_to_issue() {
        let email = Email::new("a@x.com").unwrap();

        for secs in [u64::MAX, i64::MAX as u64, 1 << 50] {
            let config =
                AuthConfig::development().with_token_ttl(std::time::Duration::from_secs(secs));
            let tokens = SessionTokenService::new(&config);
            assert!(matches!(tokens.issue(&email), Err(AuthError::Internal(_))));
        }
    }

    #[test]
    fn test_longest_configurable_lifetime_verifies() {
        let config = AuthConfig::development().with_token_ttl(MAX_TOKEN_TTL);
        let tokens = SessionTokenService::new(&config);

        let issued = tokens.issue(&Email::new("a@x.com").unwrap()).unwrap();
        assert!(tokens.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();
        let long_ago = Utc::now() - Duration::hours(25);
        let issued = tokens.issue_at(&Email::new("a@x.com").unwrap(), long_ago).unwrap();

        assert!(matches!(tokens.verify(&issued.token), Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issued = service().issue(&Email::new("a@x.com").unwrap()).unwrap();
        // Different random secret
        assert!(matches!(service().verify(&issued.token), Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let tokens = service();
        assert!(tokens.verify("").is_err());
        assert!(tokens.verify("not-a-token").is_err());
        assert!(tokens.verify("a.b.c").is_err());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let tokens = service();
        let issued = tokens.issue(&Email::new("a@x.com").unwrap()).unwrap();
        let other = tokens.issue(&Email::new("b@x.com").unwrap()).unwrap();

        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        parts[1] = other_parts[1];

        assert!(tokens.verify(&parts.join(".")).is_err());
    }
}
