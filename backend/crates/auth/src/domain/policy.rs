//! Authorization Policy
//!
//! The one ownership predicate every protected route goes through, plus the
//! role floor used by moderator/admin routes. A role never substitutes for
//! ownership: role-gated routes must pass both.

use crate::domain::entity::identity::AuthenticatedIdentity;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// True when the verified identity is the declared owner, byte for byte
pub fn is_owner(identity: &AuthenticatedIdentity, declared_owner: &Email) -> bool {
    identity.email().as_str() == declared_owner.as_str()
}

/// `VERIFIED -> ALLOWED` or `VERIFIED -> DENIED`
pub fn authorize(identity: &AuthenticatedIdentity, declared_owner: &Email) -> AuthResult<()> {
    if is_owner(identity, declared_owner) {
        Ok(())
    } else {
        tracing::warn!(
            identity = %identity.email(),
            declared_owner = %declared_owner,
            "Ownership check failed"
        );
        Err(AuthError::Forbidden)
    }
}

pub fn authorize_role(actual: UserRole, required: UserRole) -> AuthResult<()> {
    if actual >= required {
        Ok(())
    } else {
        tracing::warn!(%actual, %required, "Role check failed");
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn identity(email: &str) -> AuthenticatedIdentity {
        AuthenticatedIdentity::new(Email::new(email).unwrap(), Utc::now() + Duration::hours(1))
    }

    #[test]
    fn test_owner_is_allowed() {
        let me = identity("a@x.com");
        assert!(authorize(&me, &Email::new("a@x.com").unwrap()).is_ok());
    }

    #[test]
    fn test_owner_match_is_case_sensitive() {
        let me = identity("a@x.com");
        assert!(matches!(
            authorize(&me, &Email::new("A@x.com").unwrap()),
            Err(AuthError::Forbidden)
        ));
        assert!(authorize(&identity("A@X.com"), &Email::new("A@X.com").unwrap()).is_ok());
    }

    #[test]
    fn test_other_owner_is_forbidden() {
        let me = identity("a@x.com");
        let result = authorize(&me, &Email::new("b@x.com").unwrap());
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn test_role_floor() {
        assert!(authorize_role(UserRole::Admin, UserRole::Moderator).is_ok());
        assert!(authorize_role(UserRole::Moderator, UserRole::Moderator).is_ok());
        assert!(matches!(
            authorize_role(UserRole::User, UserRole::Moderator),
            Err(AuthError::Forbidden)
        ));
        assert!(authorize_role(UserRole::Moderator, UserRole::Admin).is_err());
    }
}
