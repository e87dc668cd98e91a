//! HTTP Handlers
//!
//! Every protected handler receives either an [`OwnerScope`] (owner declared
//! in the `email` query parameter) or an [`Identity`] it checks against the
//! owner declared in the body, before touching the store.

use std::str::FromStr;
use std::sync::Arc;

use auth::presentation::dto::SuccessResponse;
use auth::presentation::{Identity, OwnerScope};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{ApplicationId, ReviewId, ScholarshipId};
use kernel::page::Page;

use crate::application::{
    ApplicationsUseCase, ApplyInput, CatalogueUseCase, PaymentsUseCase, ReviewEdit,
    ReviewsUseCase, SavePaymentInput, SaveReviewInput, ScholarshipConfig,
};
use crate::domain::entities::{
    ApplicantDetails, Payment, Review, Scholarship, ScholarshipApplication, ScholarshipDetails,
    ScholarshipPatch,
};
use crate::domain::repository::{DocumentStore, PaymentGateway};
use crate::domain::value_objects::{ApplicationStatus, Price, Rating};
use crate::error::{ScholarshipError, ScholarshipResult};
use crate::presentation::dto::{
    ApplicationFilterQuery, ApplyRequest, CheckApplyQuery, CheckPaymentQuery, EditReviewRequest,
    InsertedResponse, PaymentIntentRequest, PaymentIntentResponse, SavePaymentRequest,
    SaveReviewRequest, SaveReviewResponse, ScholarshipListQuery, ScholarshipReviewsResponse,
    StatusUpdateRequest,
};

/// Shared state for scholarship handlers
pub struct ScholarshipAppState<D, G> {
    pub store: Arc<D>,
    pub gateway: Arc<G>,
    pub config: Arc<ScholarshipConfig>,
}

impl<D, G> ScholarshipAppState<D, G> {
    pub fn new(store: D, gateway: G, config: ScholarshipConfig) -> Self {
        Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            config: Arc::new(config),
        }
    }

    fn catalogue(&self) -> CatalogueUseCase<D>
    where
        D: DocumentStore,
    {
        CatalogueUseCase::new(self.store.clone(), self.config.clone())
    }

    fn applications(&self) -> ApplicationsUseCase<D, D>
    where
        D: DocumentStore,
    {
        ApplicationsUseCase::new(self.store.clone(), self.store.clone())
    }

    fn reviews(&self) -> ReviewsUseCase<D, D>
    where
        D: DocumentStore,
    {
        ReviewsUseCase::new(self.store.clone(), self.store.clone())
    }

    fn payments(&self) -> PaymentsUseCase<D, G>
    where
        D: DocumentStore,
        G: PaymentGateway,
    {
        PaymentsUseCase::new(self.store.clone(), self.gateway.clone(), self.config.clone())
    }
}

impl<D, G> Clone for ScholarshipAppState<D, G> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            gateway: self.gateway.clone(),
            config: self.config.clone(),
        }
    }
}

fn rating(value: i64) -> ScholarshipResult<Rating> {
    u8::try_from(value)
        .map_err(|_| ScholarshipError::malformed("Rating must be between 1 and 5"))
        .and_then(Rating::new)
}

// ============================================================================
// Scholarships (public)
// ============================================================================

/// GET /
pub async fn featured<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
) -> ScholarshipResult<Json<Vec<Scholarship>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    Ok(Json(state.catalogue().featured().await?))
}

/// GET /scholarships?page=&size=&search=
pub async fn list_scholarships<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    query: Result<Query<ScholarshipListQuery>, QueryRejection>,
) -> ScholarshipResult<Json<Page<Scholarship>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Query(query) = query?;
    let page = state
        .catalogue()
        .search(query.search.as_deref(), query.page, query.size)
        .await?;

    Ok(Json(page))
}

/// GET /details/{id}
pub async fn scholarship_details<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    Path(id): Path<String>,
) -> ScholarshipResult<Json<Scholarship>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ScholarshipId::from_str(&id)?;
    Ok(Json(state.catalogue().details(&id).await?))
}

/// GET /reviews/scholarship/{id}
pub async fn scholarship_reviews<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    Path(id): Path<String>,
) -> ScholarshipResult<Json<ScholarshipReviewsResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ScholarshipId::from_str(&id)?;
    let result = state.reviews().for_scholarship(&id).await?;

    Ok(Json(ScholarshipReviewsResponse {
        reviews: result.reviews,
        average_rating: result.average_rating,
        total_reviews: result.total_reviews,
    }))
}

// ============================================================================
// Scholarships (moderator)
// ============================================================================

/// POST /admin/scholarships?email=
pub async fn create_scholarship<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    payload: Result<Json<ScholarshipDetails>, JsonRejection>,
) -> ScholarshipResult<(StatusCode, Json<Scholarship>)>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(details) = payload?;
    let scholarship = state
        .catalogue()
        .create(details, scope.email().clone())
        .await?;

    Ok((StatusCode::CREATED, Json(scholarship)))
}

/// PATCH /admin/scholarships/{id}?email=
pub async fn update_scholarship<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    Path(id): Path<String>,
    payload: Result<Json<ScholarshipPatch>, JsonRejection>,
) -> ScholarshipResult<Json<Scholarship>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ScholarshipId::from_str(&id)?;
    let Json(patch) = payload?;

    Ok(Json(state.catalogue().update(&id, patch).await?))
}

/// DELETE /admin/scholarships/{id}?email=
pub async fn delete_scholarship<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    Path(id): Path<String>,
) -> ScholarshipResult<Json<SuccessResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ScholarshipId::from_str(&id)?;
    state.catalogue().delete(&id).await?;

    Ok(Json(SuccessResponse::ok()))
}

// ============================================================================
// Applications
// ============================================================================

/// POST /scholarApply
pub async fn scholar_apply<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    identity: Identity,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> ScholarshipResult<Json<InsertedResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let user_email = identity.authorize(&req.user_email)?;
    let scholarship_id = ScholarshipId::from_str(&req.scholarship_id)?;

    let application = state
        .applications()
        .apply(ApplyInput {
            user_email,
            user_name: req.user_name,
            scholarship_id,
            applicant: req.applicant,
        })
        .await?;

    Ok(Json(InsertedResponse {
        inserted_id: application.id.to_string(),
    }))
}

/// GET /checkApply?email=&scholarshipId=
pub async fn check_apply<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    query: Result<Query<CheckApplyQuery>, QueryRejection>,
) -> ScholarshipResult<Json<ScholarshipApplication>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Query(query) = query?;
    let scholarship_id = ScholarshipId::from_str(&query.scholarship_id)?;

    let application = state
        .applications()
        .check(scope.email(), &scholarship_id)
        .await?;

    Ok(Json(application))
}

/// GET /myApplication?email=
pub async fn my_applications<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
) -> ScholarshipResult<Json<Vec<ScholarshipApplication>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    Ok(Json(state.applications().mine(scope.email()).await?))
}

/// PATCH /applications/{id}?email=
pub async fn edit_application<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    Path(id): Path<String>,
    payload: Result<Json<ApplicantDetails>, JsonRejection>,
) -> ScholarshipResult<Json<ScholarshipApplication>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ApplicationId::from_str(&id)?;
    let Json(applicant) = payload?;

    let application = state
        .applications()
        .edit(scope.identity(), &id, applicant)
        .await?;

    Ok(Json(application))
}

/// DELETE /applications/{id}?email=
pub async fn cancel_application<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    Path(id): Path<String>,
) -> ScholarshipResult<Json<SuccessResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ApplicationId::from_str(&id)?;
    state.applications().cancel(scope.identity(), &id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /admin/applications?email=&status=
pub async fn list_applications<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    query: Result<Query<ApplicationFilterQuery>, QueryRejection>,
) -> ScholarshipResult<Json<Vec<ScholarshipApplication>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Query(query) = query?;
    let status = query
        .status
        .as_deref()
        .map(ApplicationStatus::from_str)
        .transpose()?;

    Ok(Json(state.applications().list(status).await?))
}

/// PATCH /admin/applications/{id}/status?email=
pub async fn set_application_status<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> ScholarshipResult<Json<ScholarshipApplication>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ApplicationId::from_str(&id)?;
    let Json(req) = payload?;
    let status = ApplicationStatus::from_str(&req.status)?;

    let application = state
        .applications()
        .set_status(&id, status, req.feedback)
        .await?;

    Ok(Json(application))
}

// ============================================================================
// Reviews
// ============================================================================

/// POST /saveReview
pub async fn save_review<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    identity: Identity,
    payload: Result<Json<SaveReviewRequest>, JsonRejection>,
) -> ScholarshipResult<(StatusCode, Json<SaveReviewResponse>)>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let user_email = identity.authorize(&req.user_email)?;
    let scholarship_id = ScholarshipId::from_str(&req.scholarship_id)?;

    let review = state
        .reviews()
        .save(SaveReviewInput {
            user_email,
            user_name: req.user_name,
            user_image: req.user_image,
            scholarship_id,
            rating: rating(req.rating)?,
            comment: req.comment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveReviewResponse {
            message: "Review saved successfully",
            review_id: review.id.to_string(),
        }),
    ))
}

/// GET /reviews?email=
pub async fn my_reviews<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
) -> ScholarshipResult<Json<Vec<Review>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    Ok(Json(state.reviews().mine(scope.email()).await?))
}

/// PATCH /reviews/{id}?email=
pub async fn edit_review<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    Path(id): Path<String>,
    payload: Result<Json<EditReviewRequest>, JsonRejection>,
) -> ScholarshipResult<Json<Review>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ReviewId::from_str(&id)?;
    let Json(req) = payload?;
    let edit = ReviewEdit {
        rating: req.rating.map(rating).transpose()?,
        comment: req.comment,
    };

    Ok(Json(state.reviews().edit(scope.identity(), &id, edit).await?))
}

/// DELETE /reviews/{id}?email=
pub async fn delete_review<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    Path(id): Path<String>,
) -> ScholarshipResult<Json<SuccessResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ReviewId::from_str(&id)?;
    state.reviews().delete_own(scope.identity(), &id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /admin/reviews?email=
pub async fn list_reviews<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
) -> ScholarshipResult<Json<Vec<Review>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    Ok(Json(state.reviews().list().await?))
}

/// DELETE /admin/reviews/{id}?email=
pub async fn moderate_review<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    Path(id): Path<String>,
) -> ScholarshipResult<Json<SuccessResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let id = ReviewId::from_str(&id)?;
    state.reviews().delete(&id).await?;

    Ok(Json(SuccessResponse::ok()))
}

// ============================================================================
// Payments
// ============================================================================

/// POST /create-payment-intent?email=
pub async fn create_payment_intent<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    _scope: OwnerScope,
    payload: Result<Json<PaymentIntentRequest>, JsonRejection>,
) -> ScholarshipResult<Json<PaymentIntentResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let price = Price::new(req.price()?)?;

    let client_secret = state.payments().create_intent(price).await?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// POST /savePayment
pub async fn save_payment<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    identity: Identity,
    payload: Result<Json<SavePaymentRequest>, JsonRejection>,
) -> ScholarshipResult<Json<InsertedResponse>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let email = identity.authorize(&req.email)?;
    let scholarship_id = ScholarshipId::from_str(&req.scholarship_id)?;

    let payment = state
        .payments()
        .save(SavePaymentInput {
            email,
            scholarship_id,
            transaction_id: req.transaction_id,
            amount: req.amount,
        })
        .await?;

    Ok(Json(InsertedResponse {
        inserted_id: payment.id.to_string(),
    }))
}

/// GET /paymentHistory?email=
pub async fn payment_history<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
) -> ScholarshipResult<Json<Vec<Payment>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    Ok(Json(state.payments().history(scope.email()).await?))
}

/// GET /checkPayment?email=&id=
pub async fn check_payment<D, G>(
    State(state): State<ScholarshipAppState<D, G>>,
    scope: OwnerScope,
    query: Result<Query<CheckPaymentQuery>, QueryRejection>,
) -> ScholarshipResult<Json<Option<Payment>>>
where
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Query(query) = query?;
    let scholarship_id = ScholarshipId::from_str(&query.id)?;

    Ok(Json(
        state.payments().check(scope.email(), &scholarship_id).await?,
    ))
}
