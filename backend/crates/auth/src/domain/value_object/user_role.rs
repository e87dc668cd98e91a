use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AuthError;

/// Role stored on the user record. Ordered: `User < Moderator < Admin`.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    #[display("user")]
    User = 0,
    #[display("moderator")]
    Moderator = 1,
    #[display("admin")]
    Admin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            User => "user",
            Moderator => "moderator",
            Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_moderator_or_higher(&self) -> bool {
        matches!(self, UserRole::Moderator | UserRole::Admin)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Role for a stored id; unknown ids are a data error, not a panic.
    pub fn from_id(id: i16) -> Result<Self, AuthError> {
        use UserRole::*;
        match id {
            0 => Ok(User),
            1 => Ok(Moderator),
            2 => Ok(Admin),
            _ => {
                tracing::error!(role_id = id, "Invalid stored user role");
                Err(AuthError::Internal(format!("Invalid UserRole id: {id}")))
            }
        }
    }
}

impl FromStr for UserRole {
    type Err = AuthError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "moderator" => Ok(UserRole::Moderator),
            "admin" => Ok(UserRole::Admin),
            other => Err(AuthError::malformed(format!("Unknown role `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0).unwrap(), UserRole::User);
        assert_eq!(UserRole::from_id(1).unwrap(), UserRole::Moderator);
        assert_eq!(UserRole::from_id(2).unwrap(), UserRole::Admin);
        assert!(UserRole::from_id(7).is_err());
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
        assert_eq!("Moderator".parse::<UserRole>().unwrap(), UserRole::Moderator);
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("super_admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_role_display_matches_code() {
        for role in [UserRole::User, UserRole::Moderator, UserRole::Admin] {
            assert_eq!(role.to_string(), role.code());
        }
    }

    #[test]
    fn test_user_role_ordering() {
        assert!(UserRole::User < UserRole::Moderator);
        assert!(UserRole::Moderator < UserRole::Admin);
        assert!(UserRole::Admin.is_moderator_or_higher());
        assert!(!UserRole::Moderator.is_admin());
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Moderator).unwrap(), "\"moderator\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }
}
