//! Applications Use Case
//!
//! Applicants apply, look up, edit and cancel their own applications;
//! moderators list them and move them through the status lifecycle.

use std::sync::Arc;

use auth::domain::policy::authorize;
use auth::domain::{AuthenticatedIdentity, Email};
use kernel::id::{ApplicationId, ScholarshipId};

use crate::domain::entities::{ApplicantDetails, ScholarshipApplication};
use crate::domain::repository::{ApplicationRepository, ScholarshipRepository};
use crate::domain::value_objects::ApplicationStatus;
use crate::error::{ScholarshipError, ScholarshipResult};

pub struct ApplyInput {
    /// Already checked against the caller's identity
    pub user_email: Email,
    pub user_name: Option<String>,
    pub scholarship_id: ScholarshipId,
    pub applicant: ApplicantDetails,
}

pub struct ApplicationsUseCase<S, A>
where
    S: ScholarshipRepository,
    A: ApplicationRepository,
{
    scholarships: Arc<S>,
    applications: Arc<A>,
}

impl<S, A> ApplicationsUseCase<S, A>
where
    S: ScholarshipRepository,
    A: ApplicationRepository,
{
    pub fn new(scholarships: Arc<S>, applications: Arc<A>) -> Self {
        Self {
            scholarships,
            applications,
        }
    }

    pub async fn apply(&self, input: ApplyInput) -> ScholarshipResult<ScholarshipApplication> {
        let scholarship = self
            .scholarships
            .find_by_id(&input.scholarship_id)
            .await?
            .ok_or(ScholarshipError::ScholarshipNotFound)?;

        if self
            .applications
            .find_by_user_and_scholarship(&input.user_email, &scholarship.id)
            .await?
            .is_some()
        {
            return Err(ScholarshipError::AlreadyApplied);
        }

        let application = ScholarshipApplication::new(
            &scholarship,
            input.user_email,
            input.user_name,
            input.applicant,
        );
        self.applications.create(&application).await?;

        tracing::info!(
            application_id = %application.id,
            scholarship_id = %application.scholarship_id,
            user_email = %application.user_email,
            "Application submitted"
        );

        Ok(application)
    }

    pub async fn check(
        &self,
        user_email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<ScholarshipApplication> {
        self.applications
            .find_by_user_and_scholarship(user_email, scholarship_id)
            .await?
            .ok_or(ScholarshipError::NoApplicationFound)
    }

    pub async fn mine(&self, user_email: &Email) -> ScholarshipResult<Vec<ScholarshipApplication>> {
        self.applications.list_by_user(user_email).await
    }

    /// Applicant edit of the form fields, only while pending
    pub async fn edit(
        &self,
        identity: &AuthenticatedIdentity,
        id: &ApplicationId,
        applicant: ApplicantDetails,
    ) -> ScholarshipResult<ScholarshipApplication> {
        let mut application = self.owned_editable(identity, id).await?;

        application.applicant = applicant;
        application.touch();
        self.store(&application).await?;

        tracing::info!(application_id = %id, "Application edited");
        Ok(application)
    }

    /// Applicant cancellation, only while pending
    pub async fn cancel(
        &self,
        identity: &AuthenticatedIdentity,
        id: &ApplicationId,
    ) -> ScholarshipResult<()> {
        self.owned_editable(identity, id).await?;

        if !self.applications.delete(id).await? {
            return Err(ScholarshipError::ApplicationNotFound);
        }

        tracing::info!(application_id = %id, "Application cancelled");
        Ok(())
    }

    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> ScholarshipResult<Vec<ScholarshipApplication>> {
        self.applications.list(status).await
    }

    /// Moderator status change. Re-sending the current status only updates
    /// the feedback.
    pub async fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        feedback: Option<String>,
    ) -> ScholarshipResult<ScholarshipApplication> {
        let mut application = self.find(id).await?;
        let from = application.status;

        if from != status && !from.can_transition_to(status) {
            return Err(ScholarshipError::InvalidTransition { from, to: status });
        }

        application.status = status;
        if feedback.is_some() {
            application.feedback = feedback;
        }
        application.touch();
        self.store(&application).await?;

        tracing::info!(
            application_id = %id,
            %from,
            to = %status,
            closed = status.is_final(),
            "Application status changed"
        );
        Ok(application)
    }

    async fn find(&self, id: &ApplicationId) -> ScholarshipResult<ScholarshipApplication> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or(ScholarshipError::ApplicationNotFound)
    }

    /// Record ownership first, then the lifecycle lock
    async fn owned_editable(
        &self,
        identity: &AuthenticatedIdentity,
        id: &ApplicationId,
    ) -> ScholarshipResult<ScholarshipApplication> {
        let application = self.find(id).await?;
        authorize(identity, &application.user_email)?;

        if !application.status.is_editable() {
            return Err(ScholarshipError::ApplicationLocked(application.status));
        }

        Ok(application)
    }

    async fn store(&self, application: &ScholarshipApplication) -> ScholarshipResult<()> {
        if self.applications.update(application).await? {
            Ok(())
        } else {
            Err(ScholarshipError::ApplicationNotFound)
        }
    }
}
