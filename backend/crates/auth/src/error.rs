//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The two guard outcomes have fixed
//! caller-facing bodies: 401 `unauthorized access` and 403 `forbidden access`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";
pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential, bad signature, or expired credential
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Verified identity does not own the resource (or lacks the role)
    #[error("Forbidden")]
    Forbidden,

    /// Caller-supplied field missing or of the wrong shape
    #[error("{0}")]
    MalformedInput(String),

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserExists,

    /// Signing a credential failed
    #[error("Token issue failed: {0}")]
    TokenIssue(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AuthError::MalformedInput(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserExists => StatusCode::CONFLICT,
            AuthError::TokenIssue(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::MalformedInput(_) => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::TokenIssue(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::TokenIssue(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Forbidden => {
                tracing::warn!("Request denied: forbidden access");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => AppError::unauthorized(UNAUTHORIZED_MESSAGE),
            AuthError::Forbidden => AppError::forbidden(FORBIDDEN_MESSAGE),
            AuthError::MalformedInput(msg) => AppError::bad_request(msg),
            AuthError::UserNotFound => AppError::not_found("User not found"),
            AuthError::UserExists => AppError::conflict("User already exists"),
            AuthError::Database(e) => AppError::from(e),
            AuthError::TokenIssue(_) | AuthError::Internal(_) => {
                AppError::internal(ErrorKind::InternalServerError.as_str())
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::MalformedInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AuthError {
    fn from(rejection: QueryRejection) -> Self {
        AuthError::MalformedInput(rejection.body_text())
    }
}

impl From<PathRejection> for AuthError {
    fn from(rejection: PathRejection) -> Self {
        AuthError::MalformedInput(rejection.body_text())
    }
}

impl From<uuid::Error> for AuthError {
    fn from(_: uuid::Error) -> Self {
        AuthError::MalformedInput("Invalid id".to_string())
    }
}
