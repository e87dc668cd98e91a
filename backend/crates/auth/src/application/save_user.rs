//! Save User Use Case
//!
//! Registers a user on first sign-in. Repeated calls are no-ops.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

pub struct SaveUserInput {
    pub email: Email,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

pub struct SaveUserOutput {
    /// False when the user already existed
    pub created: bool,
    pub user: User,
}

pub struct SaveUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SaveUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SaveUserInput) -> AuthResult<SaveUserOutput> {
        if let Some(user) = self.user_repo.find_by_email(&input.email).await? {
            return Ok(SaveUserOutput {
                created: false,
                user,
            });
        }

        let user = User::new(input.email, input.name, input.photo_url);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, email = %user.email, "User registered");

        Ok(SaveUserOutput {
            created: true,
            user,
        })
    }
}
