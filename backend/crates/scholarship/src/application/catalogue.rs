//! Catalogue Use Case
//!
//! Public browsing plus moderator maintenance of scholarships.

use std::sync::Arc;

use auth::domain::Email;
use kernel::id::ScholarshipId;
use kernel::page::{Page, Pagination};

use crate::application::config::ScholarshipConfig;
use crate::domain::entities::{Scholarship, ScholarshipDetails, ScholarshipPatch};
use crate::domain::repository::ScholarshipRepository;
use crate::error::{ScholarshipError, ScholarshipResult};

pub struct CatalogueUseCase<S>
where
    S: ScholarshipRepository,
{
    scholarships: Arc<S>,
    config: Arc<ScholarshipConfig>,
}

impl<S> CatalogueUseCase<S>
where
    S: ScholarshipRepository,
{
    pub fn new(scholarships: Arc<S>, config: Arc<ScholarshipConfig>) -> Self {
        Self {
            scholarships,
            config,
        }
    }

    pub async fn featured(&self) -> ScholarshipResult<Vec<Scholarship>> {
        self.scholarships.featured(self.config.featured_limit).await
    }

    pub async fn search(
        &self,
        search: Option<&str>,
        page: Option<u32>,
        size: Option<u32>,
    ) -> ScholarshipResult<Page<Scholarship>> {
        let pagination = Pagination::new(page, size, self.config.max_page_size);
        let (items, total) = self.scholarships.search(search, pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn details(&self, id: &ScholarshipId) -> ScholarshipResult<Scholarship> {
        self.scholarships
            .find_by_id(id)
            .await?
            .ok_or(ScholarshipError::ScholarshipNotFound)
    }

    pub async fn create(
        &self,
        details: ScholarshipDetails,
        posted_by: Email,
    ) -> ScholarshipResult<Scholarship> {
        validate_fees(details.application_fees, details.service_charge)?;

        let scholarship = Scholarship::new(details, posted_by);
        self.scholarships.create(&scholarship).await?;

        tracing::info!(
            scholarship_id = %scholarship.id,
            posted_by = %scholarship.posted_by,
            "Scholarship created"
        );

        Ok(scholarship)
    }

    pub async fn update(
        &self,
        id: &ScholarshipId,
        patch: ScholarshipPatch,
    ) -> ScholarshipResult<Scholarship> {
        let mut scholarship = self.details(id).await?;
        scholarship.apply(patch);
        validate_fees(
            scholarship.details.application_fees,
            scholarship.details.service_charge,
        )?;

        if !self.scholarships.update(&scholarship).await? {
            return Err(ScholarshipError::ScholarshipNotFound);
        }

        tracing::info!(scholarship_id = %id, "Scholarship updated");
        Ok(scholarship)
    }

    pub async fn delete(&self, id: &ScholarshipId) -> ScholarshipResult<()> {
        if !self.scholarships.delete(id).await? {
            return Err(ScholarshipError::ScholarshipNotFound);
        }

        tracing::info!(scholarship_id = %id, "Scholarship deleted");
        Ok(())
    }
}

fn validate_fees(application_fees: f64, service_charge: f64) -> ScholarshipResult<()> {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if valid(application_fees) && valid(service_charge) {
        Ok(())
    } else {
        Err(ScholarshipError::malformed(
            "Fees must be non-negative numbers",
        ))
    }
}
