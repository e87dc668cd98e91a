//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, ownership policy
//! - `application/` - Credential service and use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, guard middleware, extractors, router
//!
//! ## Features
//! - Signed, time-limited credential delivered as an HTTP-only `token` cookie
//! - Guard middleware: missing/invalid/expired credential is a 401 before
//!   any handler runs
//! - One ownership predicate (`verified email == declared owner email`)
//!   behind every protected route, 403 on mismatch
//! - Role floor (user < moderator < admin) for staff routes, applied on top
//!   of the ownership check, never instead of it
//!
//! ## Known gap
//! Logout only clears the cookie. There is no revocation list, so a copied
//! token keeps verifying until its expiry.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
