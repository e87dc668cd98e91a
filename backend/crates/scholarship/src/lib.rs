//! Scholarship Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Resource documents, value objects, store and gateway traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL/in-memory document stores, Stripe client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Scholarship catalogue: featured list, paginated search, details
//! - Applications with a `pending -> processing -> completed | rejected`
//!   lifecycle; applicants may edit or cancel only while pending
//! - Reviews (1 to 5 stars) with per-scholarship average
//! - Payment intents through the payment processor, payment history
//!
//! Every member route is guarded by `auth`'s credential guard and ownership
//! predicate; moderator routes additionally require the `moderator` role.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::ScholarshipConfig;
pub use error::{ScholarshipError, ScholarshipResult};
pub use infra::{InMemoryDocumentStore, PgDocumentStore, StripeConfig, StripeGateway};
pub use presentation::handlers::ScholarshipAppState;
pub use presentation::router::{member_router, moderator_router, public_router};
