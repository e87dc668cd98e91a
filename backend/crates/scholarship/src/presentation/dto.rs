//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{ApplicantDetails, Review};
use crate::error::{ScholarshipError, ScholarshipResult};

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub inserted_id: String,
}

// ============================================================================
// Scholarships
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarshipListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
}

// ============================================================================
// Applications
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub scholarship_id: String,
    /// Declared owner, must equal the caller
    pub user_email: String,
    pub user_name: Option<String>,
    #[serde(flatten)]
    pub applicant: ApplicantDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckApplyQuery {
    pub scholarship_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilterQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    pub feedback: Option<String>,
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipReviewsResponse {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReviewRequest {
    pub scholarship_id: String,
    /// Declared owner, must equal the caller
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReviewResponse {
    pub message: &'static str,
    pub review_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditReviewRequest {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

// ============================================================================
// Payments
// ============================================================================

/// `price` may arrive as a number or a numeric string
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: Option<Value>,
}

impl PaymentIntentRequest {
    pub fn price(&self) -> ScholarshipResult<f64> {
        match &self.price {
            Some(Value::Number(n)) => n.as_f64().ok_or(ScholarshipError::InvalidPrice),
            Some(Value::String(s)) => s.trim().parse().map_err(|_| ScholarshipError::InvalidPrice),
            _ => Err(ScholarshipError::InvalidPrice),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePaymentRequest {
    /// Declared owner, must equal the caller
    pub email: String,
    pub scholarship_id: String,
    pub transaction_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckPaymentQuery {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intent(price: Value) -> PaymentIntentRequest {
        serde_json::from_value(json!({ "price": price })).unwrap()
    }

    #[test]
    fn test_price_accepts_numbers_and_numeric_strings() {
        assert_eq!(intent(json!(25)).price().unwrap(), 25.0);
        assert_eq!(intent(json!(12.5)).price().unwrap(), 12.5);
        assert_eq!(intent(json!(" 7.25 ")).price().unwrap(), 7.25);
    }

    #[test]
    fn test_price_rejects_everything_else() {
        assert!(intent(json!("abc")).price().is_err());
        assert!(intent(json!(null)).price().is_err());
        assert!(intent(json!(true)).price().is_err());
        let missing: PaymentIntentRequest = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(missing.price(), Err(ScholarshipError::InvalidPrice)));
    }

    #[test]
    fn test_apply_request_flattens_applicant_fields() {
        let req: ApplyRequest = serde_json::from_value(json!({
            "scholarshipId": "x",
            "userEmail": "a@x.com",
            "phone": "123",
            "studyGap": "none"
        }))
        .unwrap();
        assert_eq!(req.applicant.phone.as_deref(), Some("123"));
        assert_eq!(req.applicant.study_gap.as_deref(), Some("none"));
    }
}
