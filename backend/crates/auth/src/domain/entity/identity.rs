//! Authenticated Identity
//!
//! The decoded credential attached to one request. It only exists for the
//! lifetime of that request and is never persisted.

use chrono::{DateTime, Utc};

use crate::domain::value_object::email::Email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    email: Email,
    expires_at: DateTime<Utc>,
}

impl AuthenticatedIdentity {
    pub fn new(email: Email, expires_at: DateTime<Utc>) -> Self {
        Self { email, expires_at }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// When the credential this identity came from stops verifying
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
