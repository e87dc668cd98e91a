//! Domain Layer
//!
//! Entities, value objects, repository traits and the authorization policy.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{identity::AuthenticatedIdentity, user::User};
pub use repository::UserRepository;
pub use value_object::{email::Email, user_role::UserRole};
