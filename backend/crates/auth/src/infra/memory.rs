//! In-memory user repository
//!
//! Used by the router tests and for running the API without a database.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.user_id, u)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserExists);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>> {
        let users = self.users.read().await;
        let mut listed: Vec<User> = users
            .values()
            .filter(|u| role.is_none_or(|r| u.user_role == r))
            .cloned()
            .collect();
        listed.sort_by_key(|u| u.created_at);
        Ok(listed)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.user_id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.users.write().await.remove(user_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(Email::new(email).unwrap(), None, None)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("a@x.com");
        repo.create(&alice).await.unwrap();

        let found = repo.find_by_email(&alice.email).await.unwrap().unwrap();
        assert_eq!(found.user_id, alice.user_id);
        assert!(repo.find_by_id(&alice.user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("a@x.com")).await.unwrap();
        let result = repo.create(&user("a@x.com")).await;
        assert!(matches!(result, Err(AuthError::UserExists)));
    }

    #[tokio::test]
    async fn test_list_with_role_filter() {
        let mut moderator = user("m@x.com");
        moderator.set_role(UserRole::Moderator);
        let repo = InMemoryUserRepository::with_users([user("a@x.com"), moderator]);

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        let moderators = repo.list(Some(UserRole::Moderator)).await.unwrap();
        assert_eq!(moderators.len(), 1);
        assert_eq!(moderators[0].email.as_str(), "m@x.com");
    }

    #[tokio::test]
    async fn test_delete_reports_missing() {
        let alice = user("a@x.com");
        let repo = InMemoryUserRepository::with_users([alice.clone()]);
        assert!(repo.delete(&alice.user_id).await.unwrap());
        assert!(!repo.delete(&alice.user_id).await.unwrap());
    }
}
