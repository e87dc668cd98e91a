//! Request Extractors
//!
//! `Identity` reads the verified credential placed in the request extensions
//! by [`require_identity`](super::middleware::require_identity). `OwnerScope`
//! additionally requires the `email` query parameter to name that identity.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::domain::entity::identity::AuthenticatedIdentity;
use crate::domain::policy::authorize;
use crate::domain::value_object::email::Email;
use crate::error::AuthError;

/// The verified identity of the caller
#[derive(Debug, Clone)]
pub struct Identity(pub AuthenticatedIdentity);

impl Identity {
    /// Ownership check against a body-declared owner
    pub fn authorize(&self, declared_owner: &str) -> Result<Email, AuthError> {
        let owner = Email::new(declared_owner)?;
        authorize(&self.0, &owner)?;
        Ok(owner)
    }

    pub fn email(&self) -> &Email {
        self.0.email()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(Identity)
            .ok_or(AuthError::Unauthenticated)
    }
}

#[derive(Debug, Deserialize)]
struct OwnerQuery {
    email: Option<String>,
}

/// A verified identity whose email equals the `email` query parameter
#[derive(Debug, Clone)]
pub struct OwnerScope {
    identity: AuthenticatedIdentity,
}

impl OwnerScope {
    /// The owner email, identical to the caller's identity
    pub fn email(&self) -> &Email {
        self.identity.email()
    }

    pub fn identity(&self) -> &AuthenticatedIdentity {
        &self.identity
    }
}

impl<S> FromRequestParts<S> for OwnerScope
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Identity(identity) = Identity::from_request_parts(parts, state).await?;

        let Query(query) = Query::<OwnerQuery>::try_from_uri(&parts.uri)?;
        let declared = query
            .email
            .ok_or_else(|| AuthError::malformed("email query parameter is required"))?;
        let owner = Email::new(declared)?;

        authorize(&identity, &owner)?;

        Ok(OwnerScope { identity })
    }
}
