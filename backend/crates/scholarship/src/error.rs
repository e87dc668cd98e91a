//! Scholarship Error Types
//!
//! Domain errors for the catalogue, applications, reviews and payments.
//! They integrate with the unified `kernel::error::AppError` system; guard
//! failures are carried through unchanged as [`AuthError`].

use auth::error::AuthError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::ApplicationStatus;

/// Scholarship-specific result type alias
pub type ScholarshipResult<T> = Result<T, ScholarshipError>;

#[derive(Debug, Error)]
pub enum ScholarshipError {
    #[error("Scholarship not found")]
    ScholarshipNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    /// `checkApply` miss
    #[error("No application found for the given user and scholarship ID")]
    NoApplicationFound,

    #[error("Review not found")]
    ReviewNotFound,

    #[error("You have already applied for this scholarship")]
    AlreadyApplied,

    /// Applicant edits are only possible while the application is pending
    #[error("Application is {0} and can no longer be changed")]
    ApplicationLocked(ApplicationStatus),

    #[error("Cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Invalid price")]
    InvalidPrice,

    #[error("{0}")]
    MalformedInput(String),

    /// Payment processor call failed or returned an error
    #[error("Payment processor error: {0}")]
    PaymentGateway(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScholarshipError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ScholarshipError::MalformedInput(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScholarshipError::ScholarshipNotFound
            | ScholarshipError::ApplicationNotFound
            | ScholarshipError::NoApplicationFound
            | ScholarshipError::ReviewNotFound => ErrorKind::NotFound,
            ScholarshipError::AlreadyApplied
            | ScholarshipError::ApplicationLocked(_)
            | ScholarshipError::InvalidTransition { .. } => ErrorKind::Conflict,
            ScholarshipError::InvalidPrice | ScholarshipError::MalformedInput(_) => {
                ErrorKind::BadRequest
            }
            ScholarshipError::PaymentGateway(_) => ErrorKind::BadGateway,
            ScholarshipError::Auth(e) => e.kind(),
            // Refined by the sqlx conversion when rendered
            ScholarshipError::Database(_) | ScholarshipError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ScholarshipError::Database(e) => {
                tracing::error!(error = %e, "Scholarship database error");
            }
            ScholarshipError::PaymentGateway(msg) => {
                tracing::error!(message = %msg, "Payment processor error");
            }
            ScholarshipError::Internal(msg) => {
                tracing::error!(message = %msg, "Scholarship internal error");
            }
            ScholarshipError::AlreadyApplied
            | ScholarshipError::ApplicationLocked(_)
            | ScholarshipError::InvalidTransition { .. } => {
                tracing::warn!(error = %self, "Scholarship conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Scholarship error");
            }
        }
    }
}

impl From<ScholarshipError> for AppError {
    fn from(err: ScholarshipError) -> Self {
        match err {
            ScholarshipError::Auth(e) => AppError::from(e),
            ScholarshipError::Database(e) => AppError::from(e),
            ScholarshipError::PaymentGateway(_) => {
                AppError::bad_gateway("Failed to create payment intent")
            }
            ScholarshipError::Internal(_) => {
                AppError::internal(ErrorKind::InternalServerError.as_str())
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for ScholarshipError {
    fn into_response(self) -> Response {
        match self {
            // Guard failures log and render the auth way
            ScholarshipError::Auth(e) => e.into_response(),
            other => {
                other.log();
                AppError::from(other).into_response()
            }
        }
    }
}

impl From<JsonRejection> for ScholarshipError {
    fn from(rejection: JsonRejection) -> Self {
        ScholarshipError::MalformedInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ScholarshipError {
    fn from(rejection: QueryRejection) -> Self {
        ScholarshipError::MalformedInput(rejection.body_text())
    }
}

impl From<PathRejection> for ScholarshipError {
    fn from(rejection: PathRejection) -> Self {
        ScholarshipError::MalformedInput(rejection.body_text())
    }
}

impl From<uuid::Error> for ScholarshipError {
    fn from(_: uuid::Error) -> Self {
        ScholarshipError::MalformedInput("Invalid id".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ScholarshipError::ScholarshipNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ScholarshipError::AlreadyApplied.status_code(), StatusCode::CONFLICT);
        assert_eq!(ScholarshipError::InvalidPrice.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ScholarshipError::PaymentGateway("down".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ScholarshipError::Auth(AuthError::Forbidden).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_app_error_messages() {
        let app: AppError = ScholarshipError::NoApplicationFound.into();
        assert_eq!(app.message(), "No application found for the given user and scholarship ID");

        let app: AppError = ScholarshipError::Auth(AuthError::Unauthenticated).into();
        assert_eq!(app.message(), "unauthorized access");

        // Processor details stay in the logs
        let app: AppError = ScholarshipError::PaymentGateway("card_declined".into()).into();
        assert_eq!(app.status_code(), 502);
        assert!(!app.message().contains("card_declined"));
    }
}
