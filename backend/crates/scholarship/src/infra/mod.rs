//! Infrastructure Layer
//!
//! Document store implementations and the payment processor client.

pub mod memory;
pub mod postgres;
pub mod stripe;

pub use memory::InMemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use stripe::{StripeConfig, StripeGateway};
