//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::{Identity, OwnerScope};
pub use handlers::AuthAppState;
pub use middleware::{GuardState, RoleGuardState, require_identity, require_role};
pub use router::{admin_user_router, session_router, user_router};
