//! Repository Traits
//!
//! Interfaces for the document store and the payment processor.
//! Implementations are in the infra layer.

use auth::domain::Email;
use kernel::id::{ApplicationId, ReviewId, ScholarshipId};
use kernel::page::Pagination;

use crate::domain::entities::{Payment, Review, Scholarship, ScholarshipApplication};
use crate::domain::value_objects::{ApplicationStatus, MinorUnits};
use crate::error::ScholarshipResult;

/// Scholarship repository trait
#[trait_variant::make(ScholarshipRepository: Send)]
pub trait LocalScholarshipRepository {
    async fn create(&self, scholarship: &Scholarship) -> ScholarshipResult<()>;

    async fn find_by_id(&self, id: &ScholarshipId) -> ScholarshipResult<Option<Scholarship>>;

    /// Cheapest first, newest first among equal fees
    async fn featured(&self, limit: u32) -> ScholarshipResult<Vec<Scholarship>>;

    /// Newest first. `search` matches scholarship name, university name and
    /// degree, case-insensitively. Returns the page and the unpaginated total.
    async fn search(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> ScholarshipResult<(Vec<Scholarship>, u64)>;

    /// Returns false when no such scholarship existed
    async fn update(&self, scholarship: &Scholarship) -> ScholarshipResult<bool>;

    async fn delete(&self, id: &ScholarshipId) -> ScholarshipResult<bool>;
}

/// Application repository trait
#[trait_variant::make(ApplicationRepository: Send)]
pub trait LocalApplicationRepository {
    /// Fails with `AlreadyApplied` when the user already applied
    async fn create(&self, application: &ScholarshipApplication) -> ScholarshipResult<()>;

    async fn find_by_id(&self, id: &ApplicationId)
    -> ScholarshipResult<Option<ScholarshipApplication>>;

    async fn find_by_user_and_scholarship(
        &self,
        user_email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<ScholarshipApplication>>;

    /// Newest first
    async fn list_by_user(&self, user_email: &Email)
    -> ScholarshipResult<Vec<ScholarshipApplication>>;

    /// Newest first, optionally one status only
    async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> ScholarshipResult<Vec<ScholarshipApplication>>;

    async fn update(&self, application: &ScholarshipApplication) -> ScholarshipResult<bool>;

    async fn delete(&self, id: &ApplicationId) -> ScholarshipResult<bool>;
}

/// Review repository trait
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    async fn create(&self, review: &Review) -> ScholarshipResult<()>;

    async fn find_by_id(&self, id: &ReviewId) -> ScholarshipResult<Option<Review>>;

    /// Newest first
    async fn list_by_scholarship(&self, scholarship_id: &ScholarshipId)
    -> ScholarshipResult<Vec<Review>>;

    async fn list_by_user(&self, user_email: &Email) -> ScholarshipResult<Vec<Review>>;

    async fn list(&self) -> ScholarshipResult<Vec<Review>>;

    async fn update(&self, review: &Review) -> ScholarshipResult<bool>;

    async fn delete(&self, id: &ReviewId) -> ScholarshipResult<bool>;
}

/// Payment repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create(&self, payment: &Payment) -> ScholarshipResult<()>;

    /// Newest first
    async fn list_by_email(&self, email: &Email) -> ScholarshipResult<Vec<Payment>>;

    async fn find_by_email_and_scholarship(
        &self,
        email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<Payment>>;
}

/// Result of a payment intent creation
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Payment processor trait
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    async fn create_payment_intent(
        &self,
        amount: MinorUnits,
        currency: &str,
    ) -> ScholarshipResult<PaymentIntent>;
}

/// Everything the routes need from the document store
pub trait DocumentStore:
    ScholarshipRepository + ApplicationRepository + ReviewRepository + PaymentRepository + Send + Sync + 'static
{
}

impl<T> DocumentStore for T where
    T: ScholarshipRepository
        + ApplicationRepository
        + ReviewRepository
        + PaymentRepository
        + Send
        + Sync
        + 'static
{
}
