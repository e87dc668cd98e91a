//! Reviews Use Case

use std::sync::Arc;

use auth::domain::policy::authorize;
use auth::domain::{AuthenticatedIdentity, Email};
use chrono::Utc;
use kernel::id::{ReviewId, ScholarshipId};

use crate::domain::entities::Review;
use crate::domain::repository::{ReviewRepository, ScholarshipRepository};
use crate::domain::services::average_rating;
use crate::domain::value_objects::Rating;
use crate::error::{ScholarshipError, ScholarshipResult};

pub struct SaveReviewInput {
    /// Already checked against the caller's identity
    pub user_email: Email,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub scholarship_id: ScholarshipId,
    pub rating: Rating,
    pub comment: String,
}

#[derive(Default)]
pub struct ReviewEdit {
    pub rating: Option<Rating>,
    pub comment: Option<String>,
}

/// Reviews of one scholarship with their aggregate
pub struct ScholarshipReviews {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: usize,
}

pub struct ReviewsUseCase<S, R>
where
    S: ScholarshipRepository,
    R: ReviewRepository,
{
    scholarships: Arc<S>,
    reviews: Arc<R>,
}

impl<S, R> ReviewsUseCase<S, R>
where
    S: ScholarshipRepository,
    R: ReviewRepository,
{
    pub fn new(scholarships: Arc<S>, reviews: Arc<R>) -> Self {
        Self {
            scholarships,
            reviews,
        }
    }

    pub async fn for_scholarship(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<ScholarshipReviews> {
        let reviews = self.reviews.list_by_scholarship(scholarship_id).await?;

        Ok(ScholarshipReviews {
            average_rating: average_rating(&reviews),
            total_reviews: reviews.len(),
            reviews,
        })
    }

    pub async fn save(&self, input: SaveReviewInput) -> ScholarshipResult<Review> {
        let scholarship = self
            .scholarships
            .find_by_id(&input.scholarship_id)
            .await?
            .ok_or(ScholarshipError::ScholarshipNotFound)?;

        let review = Review {
            id: ReviewId::new(),
            scholarship_id: scholarship.id,
            scholarship_name: Some(scholarship.details.scholarship_name),
            university_name: Some(scholarship.details.university_name),
            user_email: input.user_email,
            user_name: input.user_name,
            user_image: input.user_image,
            rating: input.rating,
            comment: input.comment,
            review_date: Utc::now(),
        };
        self.reviews.create(&review).await?;

        tracing::info!(
            review_id = %review.id,
            scholarship_id = %review.scholarship_id,
            rating = review.rating.value(),
            "Review saved"
        );

        Ok(review)
    }

    pub async fn mine(&self, user_email: &Email) -> ScholarshipResult<Vec<Review>> {
        self.reviews.list_by_user(user_email).await
    }

    pub async fn list(&self) -> ScholarshipResult<Vec<Review>> {
        self.reviews.list().await
    }

    pub async fn edit(
        &self,
        identity: &AuthenticatedIdentity,
        id: &ReviewId,
        edit: ReviewEdit,
    ) -> ScholarshipResult<Review> {
        let mut review = self.find(id).await?;
        authorize(identity, &review.user_email)?;

        if let Some(rating) = edit.rating {
            review.rating = rating;
        }
        if let Some(comment) = edit.comment {
            review.comment = comment;
        }
        review.review_date = Utc::now();

        if !self.reviews.update(&review).await? {
            return Err(ScholarshipError::ReviewNotFound);
        }

        tracing::info!(review_id = %id, "Review edited");
        Ok(review)
    }

    /// Author deletion
    pub async fn delete_own(
        &self,
        identity: &AuthenticatedIdentity,
        id: &ReviewId,
    ) -> ScholarshipResult<()> {
        let review = self.find(id).await?;
        authorize(identity, &review.user_email)?;
        self.delete(id).await
    }

    /// Moderator deletion of any review
    pub async fn delete(&self, id: &ReviewId) -> ScholarshipResult<()> {
        if !self.reviews.delete(id).await? {
            return Err(ScholarshipError::ReviewNotFound);
        }

        tracing::info!(review_id = %id, "Review deleted");
        Ok(())
    }

    async fn find(&self, id: &ReviewId) -> ScholarshipResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or(ScholarshipError::ReviewNotFound)
    }
}
