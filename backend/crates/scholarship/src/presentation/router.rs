//! Scholarship Routers
//!
//! Three groups with one guard level each: public, member (credential plus
//! ownership) and moderator (credential, ownership and a role floor).

use std::sync::Arc;

use auth::domain::{UserRepository, UserRole};
use auth::presentation::middleware::GuardState;
use auth::presentation::router::{protect, restrict};
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::domain::repository::{DocumentStore, PaymentGateway};
use crate::presentation::handlers::{self, ScholarshipAppState};

/// Catalogue browsing and scholarship reviews
pub fn public_router<D, G>(state: ScholarshipAppState<D, G>) -> Router
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::featured::<D, G>))
        .route("/scholarships", get(handlers::list_scholarships::<D, G>))
        .route("/details/{id}", get(handlers::scholarship_details::<D, G>))
        .route(
            "/reviews/scholarship/{id}",
            get(handlers::scholarship_reviews::<D, G>),
        )
        .with_state(state)
}

/// The caller's own applications, reviews and payments
pub fn member_router<D, G>(state: ScholarshipAppState<D, G>, guard: &GuardState) -> Router
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let router = Router::new()
        // Applications
        .route("/scholarApply", post(handlers::scholar_apply::<D, G>))
        .route("/checkApply", get(handlers::check_apply::<D, G>))
        .route("/myApplication", get(handlers::my_applications::<D, G>))
        .route(
            "/applications/{id}",
            patch(handlers::edit_application::<D, G>).delete(handlers::cancel_application::<D, G>),
        )
        // Reviews
        .route("/saveReview", post(handlers::save_review::<D, G>))
        .route("/reviews", get(handlers::my_reviews::<D, G>))
        .route(
            "/reviews/{id}",
            patch(handlers::edit_review::<D, G>).delete(handlers::delete_review::<D, G>),
        )
        // Payments
        .route(
            "/create-payment-intent",
            post(handlers::create_payment_intent::<D, G>),
        )
        .route("/savePayment", post(handlers::save_payment::<D, G>))
        .route("/paymentHistory", get(handlers::payment_history::<D, G>))
        .route("/checkPayment", get(handlers::check_payment::<D, G>))
        .with_state(state);

    protect(router, guard)
}

/// Catalogue maintenance, application processing and review moderation
pub fn moderator_router<D, G, U>(
    state: ScholarshipAppState<D, G>,
    guard: &GuardState,
    users: Arc<U>,
) -> Router
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let router = Router::new()
        .route(
            "/admin/scholarships",
            post(handlers::create_scholarship::<D, G>),
        )
        .route(
            "/admin/scholarships/{id}",
            patch(handlers::update_scholarship::<D, G>)
                .delete(handlers::delete_scholarship::<D, G>),
        )
        .route(
            "/admin/applications",
            get(handlers::list_applications::<D, G>),
        )
        .route(
            "/admin/applications/{id}/status",
            patch(handlers::set_application_status::<D, G>),
        )
        .route("/admin/reviews", get(handlers::list_reviews::<D, G>))
        .route(
            "/admin/reviews/{id}",
            delete(handlers::moderate_review::<D, G>),
        )
        .with_state(state);

    restrict(router, guard, users, UserRole::Moderator)
}
