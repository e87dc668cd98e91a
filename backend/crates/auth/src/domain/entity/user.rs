//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_role::UserRole};

/// Platform user. The email is the identity key shared with credentials.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New users always start with the `user` role
    pub fn new(email: Email, name: Option<String>, photo_url: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            name,
            photo_url,
            user_role: UserRole::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_to_user_role() {
        let user = User::new(Email::new("a@x.com").unwrap(), None, None);
        assert_eq!(user.user_role, UserRole::User);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_set_role_touches_updated_at() {
        let mut user = User::new(Email::new("a@x.com").unwrap(), None, None);
        let before = user.updated_at;
        user.set_role(UserRole::Moderator);
        assert_eq!(user.user_role, UserRole::Moderator);
        assert!(user.updated_at >= before);
    }
}
