//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod manage_users;
pub mod save_user;
pub mod session_token;
pub mod user_role;

// Re-exports
pub use config::AuthConfig;
pub use manage_users::ManageUsersUseCase;
pub use save_user::{SaveUserInput, SaveUserOutput, SaveUserUseCase};
pub use session_token::{IssuedToken, SessionClaims, SessionTokenService};
pub use user_role::UserRoleUseCase;
