//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ScholarshipAppState;
pub use router::{member_router, moderator_router, public_router};
