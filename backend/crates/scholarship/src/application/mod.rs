//! Application Layer
//!
//! Use cases. Each one is generic over the single collaborator trait it
//! needs, so the same store value can back all of them.

pub mod applications;
pub mod catalogue;
pub mod config;
pub mod payments;
pub mod reviews;

// Re-exports
pub use applications::{ApplicationsUseCase, ApplyInput};
pub use catalogue::CatalogueUseCase;
pub use config::ScholarshipConfig;
pub use payments::{PaymentsUseCase, SavePaymentInput};
pub use reviews::{ReviewEdit, ReviewsUseCase, SaveReviewInput, ScholarshipReviews};
