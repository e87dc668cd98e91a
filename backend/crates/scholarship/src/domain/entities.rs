//! Domain Entities
//!
//! Resource documents. Each one is stored as a single JSON document and
//! returned in the same camelCase shape, with the id under `_id`.

use auth::domain::Email;
use chrono::{DateTime, Utc};
use kernel::id::{ApplicationId, PaymentId, ReviewId, ScholarshipId};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ApplicationStatus, Rating};

// ============================================================================
// Scholarship
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    #[serde(rename = "_id")]
    pub id: ScholarshipId,
    #[serde(flatten)]
    pub details: ScholarshipDetails,
    pub post_date: DateTime<Utc>,
    /// Moderator who posted it
    pub posted_by: Email,
}

/// Editable part of a scholarship
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipDetails {
    pub scholarship_name: String,
    pub university_name: String,
    pub university_image: Option<String>,
    pub university_country: String,
    pub university_city: String,
    pub university_world_rank: Option<u32>,
    pub subject_category: String,
    pub scholarship_category: String,
    pub degree: String,
    pub tuition_fees: Option<f64>,
    pub application_fees: f64,
    pub service_charge: f64,
    pub application_deadline: Option<String>,
    pub description: Option<String>,
}

/// Partial update; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipPatch {
    pub scholarship_name: Option<String>,
    pub university_name: Option<String>,
    pub university_image: Option<String>,
    pub university_country: Option<String>,
    pub university_city: Option<String>,
    pub university_world_rank: Option<u32>,
    pub subject_category: Option<String>,
    pub scholarship_category: Option<String>,
    pub degree: Option<String>,
    pub tuition_fees: Option<f64>,
    pub application_fees: Option<f64>,
    pub service_charge: Option<f64>,
    pub application_deadline: Option<String>,
    pub description: Option<String>,
}

impl Scholarship {
    pub fn new(details: ScholarshipDetails, posted_by: Email) -> Self {
        Self {
            id: ScholarshipId::new(),
            details,
            post_date: Utc::now(),
            posted_by,
        }
    }

    pub fn apply(&mut self, patch: ScholarshipPatch) {
        let d = &mut self.details;
        if let Some(v) = patch.scholarship_name {
            d.scholarship_name = v;
        }
        if let Some(v) = patch.university_name {
            d.university_name = v;
        }
        if let Some(v) = patch.university_image {
            d.university_image = Some(v);
        }
        if let Some(v) = patch.university_country {
            d.university_country = v;
        }
        if let Some(v) = patch.university_city {
            d.university_city = v;
        }
        if let Some(v) = patch.university_world_rank {
            d.university_world_rank = Some(v);
        }
        if let Some(v) = patch.subject_category {
            d.subject_category = v;
        }
        if let Some(v) = patch.scholarship_category {
            d.scholarship_category = v;
        }
        if let Some(v) = patch.degree {
            d.degree = v;
        }
        if let Some(v) = patch.tuition_fees {
            d.tuition_fees = Some(v);
        }
        if let Some(v) = patch.application_fees {
            d.application_fees = v;
        }
        if let Some(v) = patch.service_charge {
            d.service_charge = v;
        }
        if let Some(v) = patch.application_deadline {
            d.application_deadline = Some(v);
        }
        if let Some(v) = patch.description {
            d.description = Some(v);
        }
    }
}

// ============================================================================
// Application
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipApplication {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    pub scholarship_id: ScholarshipId,
    pub user_email: Email,
    pub user_name: Option<String>,
    #[serde(flatten)]
    pub applicant: ApplicantDetails,
    /// Copied from the scholarship when applying
    pub university_name: String,
    pub scholarship_category: String,
    pub subject_category: String,
    pub application_fees: f64,
    pub service_charge: f64,
    pub status: ApplicationStatus,
    pub feedback: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Applicant-supplied form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub applying_degree: Option<String>,
    pub ssc_result: Option<String>,
    pub hsc_result: Option<String>,
    pub study_gap: Option<String>,
}

impl ScholarshipApplication {
    pub fn new(
        scholarship: &Scholarship,
        user_email: Email,
        user_name: Option<String>,
        applicant: ApplicantDetails,
    ) -> Self {
        let now = Utc::now();
        let details = &scholarship.details;

        Self {
            id: ApplicationId::new(),
            scholarship_id: scholarship.id,
            user_email,
            user_name,
            applicant,
            university_name: details.university_name.clone(),
            scholarship_category: details.scholarship_category.clone(),
            subject_category: details.subject_category.clone(),
            application_fees: details.application_fees,
            service_charge: details.service_charge,
            status: ApplicationStatus::Pending,
            feedback: None,
            applied_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// Review
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub scholarship_id: ScholarshipId,
    pub scholarship_name: Option<String>,
    pub university_name: Option<String>,
    pub user_email: Email,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub rating: Rating,
    pub comment: String,
    pub review_date: DateTime<Utc>,
}

// ============================================================================
// Payment
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: PaymentId,
    pub email: Email,
    pub scholarship_id: ScholarshipId,
    /// Processor reference
    pub transaction_id: String,
    /// Major units as charged
    pub amount: f64,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn details() -> ScholarshipDetails {
        ScholarshipDetails {
            scholarship_name: "Global Excellence".to_string(),
            university_name: "Uni".to_string(),
            university_image: None,
            university_country: "JP".to_string(),
            university_city: "Tokyo".to_string(),
            university_world_rank: Some(20),
            subject_category: "Engineering".to_string(),
            scholarship_category: "Full fund".to_string(),
            degree: "Masters".to_string(),
            tuition_fees: None,
            application_fees: 30.0,
            service_charge: 5.0,
            application_deadline: None,
            description: None,
        }
    }

    #[test]
    fn test_scholarship_wire_shape() {
        let s = Scholarship::new(details(), Email::new("m@x.com").unwrap());
        let value = serde_json::to_value(&s).unwrap();

        assert_eq!(value["_id"], serde_json::json!(s.id.to_string()));
        assert_eq!(value["scholarshipName"], "Global Excellence");
        assert_eq!(value["applicationFees"], 30.0);
        assert_eq!(value["postedBy"], "m@x.com");
        assert!(value.get("details").is_none());

        let back: Scholarship = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, s.id);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut s = Scholarship::new(details(), Email::new("m@x.com").unwrap());
        s.apply(ScholarshipPatch {
            application_fees: Some(10.0),
            ..Default::default()
        });
        assert_eq!(s.details.application_fees, 10.0);
        assert_eq!(s.details.scholarship_name, "Global Excellence");
    }

    #[test]
    fn test_application_copies_scholarship_fees() {
        let s = Scholarship::new(details(), Email::new("m@x.com").unwrap());
        let app = ScholarshipApplication::new(
            &s,
            Email::new("a@x.com").unwrap(),
            None,
            ApplicantDetails::default(),
        );
        assert_eq!(app.scholarship_id, s.id);
        assert_eq!(app.application_fees, 30.0);
        assert_eq!(app.status, ApplicationStatus::Pending);
    }
}
