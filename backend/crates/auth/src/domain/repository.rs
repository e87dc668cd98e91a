//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// All users, oldest first, optionally restricted to one role
    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>>;

    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Returns false when no such user existed
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
