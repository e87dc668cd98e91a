//! In-memory Document Store
//!
//! Same contract as the PostgreSQL store. Used by the router tests and for
//! running the API without a database.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use auth::domain::Email;
use kernel::id::{ApplicationId, PaymentId, ReviewId, ScholarshipId};
use kernel::page::Pagination;
use tokio::sync::RwLock;

use crate::domain::entities::{Payment, Review, Scholarship, ScholarshipApplication};
use crate::domain::repository::{
    ApplicationRepository, PaymentRepository, ReviewRepository, ScholarshipRepository,
};
use crate::domain::services::matches_search;
use crate::domain::value_objects::ApplicationStatus;
use crate::error::{ScholarshipError, ScholarshipResult};

#[derive(Debug, Default)]
struct Collections {
    scholarships: HashMap<ScholarshipId, Scholarship>,
    applications: HashMap<ApplicationId, ScholarshipApplication>,
    reviews: HashMap<ReviewId, Review>,
    payments: HashMap<PaymentId, Payment>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<RwLock<Collections>>,
}

/// Document counts, for asserting on side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentCounts {
    pub scholarships: usize,
    pub applications: usize,
    pub reviews: usize,
    pub payments: usize,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn counts(&self) -> DocumentCounts {
        let inner = self.inner.read().await;
        DocumentCounts {
            scholarships: inner.scholarships.len(),
            applications: inner.applications.len(),
            reviews: inner.reviews.len(),
            payments: inner.payments.len(),
        }
    }
}

impl ScholarshipRepository for InMemoryDocumentStore {
    async fn create(&self, scholarship: &Scholarship) -> ScholarshipResult<()> {
        let mut inner = self.inner.write().await;
        inner.scholarships.insert(scholarship.id, scholarship.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ScholarshipId) -> ScholarshipResult<Option<Scholarship>> {
        Ok(self.inner.read().await.scholarships.get(id).cloned())
    }

    async fn featured(&self, limit: u32) -> ScholarshipResult<Vec<Scholarship>> {
        let inner = self.inner.read().await;
        let mut all: Vec<Scholarship> = inner.scholarships.values().cloned().collect();
        all.sort_by(|a, b| {
            a.details
                .application_fees
                .total_cmp(&b.details.application_fees)
                .then_with(|| b.post_date.cmp(&a.post_date))
        });
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn search(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> ScholarshipResult<(Vec<Scholarship>, u64)> {
        let inner = self.inner.read().await;
        let term = search.map(str::trim).filter(|t| !t.is_empty());

        let mut matched: Vec<Scholarship> = inner
            .scholarships
            .values()
            .filter(|s| {
                term.is_none_or(|t| {
                    let d = &s.details;
                    matches_search(
                        &[
                            d.scholarship_name.as_str(),
                            d.university_name.as_str(),
                            d.degree.as_str(),
                        ],
                        t,
                    )
                })
            })
            .cloned()
            .collect();
        matched.sort_by_key(|s| Reverse(s.post_date));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(pagination.skip() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, scholarship: &Scholarship) -> ScholarshipResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(replace(&mut inner.scholarships, scholarship.id, scholarship))
    }

    async fn delete(&self, id: &ScholarshipId) -> ScholarshipResult<bool> {
        Ok(self.inner.write().await.scholarships.remove(id).is_some())
    }
}

impl ApplicationRepository for InMemoryDocumentStore {
    async fn create(&self, application: &ScholarshipApplication) -> ScholarshipResult<()> {
        let mut inner = self.inner.write().await;

        let duplicate = inner.applications.values().any(|a| {
            a.user_email == application.user_email && a.scholarship_id == application.scholarship_id
        });
        if duplicate {
            return Err(ScholarshipError::AlreadyApplied);
        }

        inner.applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ApplicationId) -> ScholarshipResult<Option<ScholarshipApplication>> {
        Ok(self.inner.read().await.applications.get(id).cloned())
    }

    async fn find_by_user_and_scholarship(
        &self,
        user_email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<ScholarshipApplication>> {
        let inner = self.inner.read().await;
        Ok(inner
            .applications
            .values()
            .find(|a| &a.user_email == user_email && &a.scholarship_id == scholarship_id)
            .cloned())
    }

    async fn list_by_user(&self, user_email: &Email) -> ScholarshipResult<Vec<ScholarshipApplication>> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            inner.applications.values().filter(|a| &a.user_email == user_email),
            |a| a.applied_at,
        ))
    }

    async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> ScholarshipResult<Vec<ScholarshipApplication>> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            inner
                .applications
                .values()
                .filter(|a| status.is_none_or(|s| a.status == s)),
            |a| a.applied_at,
        ))
    }

    async fn update(&self, application: &ScholarshipApplication) -> ScholarshipResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(replace(&mut inner.applications, application.id, application))
    }

    async fn delete(&self, id: &ApplicationId) -> ScholarshipResult<bool> {
        Ok(self.inner.write().await.applications.remove(id).is_some())
    }
}

impl ReviewRepository for InMemoryDocumentStore {
    async fn create(&self, review: &Review) -> ScholarshipResult<()> {
        self.inner.write().await.reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> ScholarshipResult<Option<Review>> {
        Ok(self.inner.read().await.reviews.get(id).cloned())
    }

    async fn list_by_scholarship(&self, scholarship_id: &ScholarshipId) -> ScholarshipResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            inner
                .reviews
                .values()
                .filter(|r| &r.scholarship_id == scholarship_id),
            |r| r.review_date,
        ))
    }

    async fn list_by_user(&self, user_email: &Email) -> ScholarshipResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            inner.reviews.values().filter(|r| &r.user_email == user_email),
            |r| r.review_date,
        ))
    }

    async fn list(&self) -> ScholarshipResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(newest_first(inner.reviews.values(), |r| r.review_date))
    }

    async fn update(&self, review: &Review) -> ScholarshipResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(replace(&mut inner.reviews, review.id, review))
    }

    async fn delete(&self, id: &ReviewId) -> ScholarshipResult<bool> {
        Ok(self.inner.write().await.reviews.remove(id).is_some())
    }
}

impl PaymentRepository for InMemoryDocumentStore {
    async fn create(&self, payment: &Payment) -> ScholarshipResult<()> {
        self.inner.write().await.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn list_by_email(&self, email: &Email) -> ScholarshipResult<Vec<Payment>> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            inner.payments.values().filter(|p| &p.email == email),
            |p| p.date,
        ))
    }

    async fn find_by_email_and_scholarship(
        &self,
        email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<Payment>> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            inner
                .payments
                .values()
                .filter(|p| &p.email == email && &p.scholarship_id == scholarship_id),
            |p| p.date,
        )
        .into_iter()
        .next())
    }
}

fn replace<K, V>(collection: &mut HashMap<K, V>, id: K, doc: &V) -> bool
where
    K: std::hash::Hash + Eq,
    V: Clone,
{
    match collection.get_mut(&id) {
        Some(stored) => {
            *stored = doc.clone();
            true
        }
        None => false,
    }
}

fn newest_first<'a, T, K, I, F>(docs: I, key: F) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut docs: Vec<T> = docs.cloned().collect();
    docs.sort_by_key(|d| Reverse(key(d)));
    docs
}
