//! User Role Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::policy::authorize_role;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct UserRoleUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserRoleUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn role_of(&self, email: &Email) -> AuthResult<UserRole> {
        self.user_repo
            .find_by_email(email)
            .await?
            .map(|user| user.user_role)
            .ok_or(AuthError::UserNotFound)
    }

    /// The stored user for `email`, provided their role is at least
    /// `required`. An unknown caller is forbidden rather than not found.
    pub async fn require(&self, email: &Email, required: UserRole) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::Forbidden)?;

        authorize_role(user.user_role, required)?;

        Ok(user)
    }

    pub async fn change_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let previous = user.user_role;
        user.set_role(role);
        self.user_repo.update(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            from = %previous,
            to = %role,
            "User role changed"
        );

        Ok(user)
    }
}
