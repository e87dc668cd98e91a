//! Auth Middleware
//!
//! `require_identity` is the guard in front of every protected route:
//! `UNVERIFIED -> VERIFIED` or a 401 before the handler runs.
//! `require_role` sits behind it on staff routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::session_token::SessionTokenService;
use crate::application::user_role::UserRoleUseCase;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::extract::OwnerScope;

/// Guard state
#[derive(Clone)]
pub struct GuardState {
    pub tokens: Arc<SessionTokenService>,
    pub cookie_name: Arc<str>,
}

impl GuardState {
    pub fn new(tokens: Arc<SessionTokenService>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            tokens,
            cookie_name: cookie_name.into(),
        }
    }
}

/// Middleware that requires a valid credential cookie
pub async fn require_identity(
    State(guard): State<GuardState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(token) = platform::cookie::extract_cookie(req.headers(), &guard.cookie_name) else {
        tracing::debug!(path = %req.uri().path(), "No session cookie");
        return Err(AuthError::Unauthenticated);
    };

    let identity = guard.tokens.verify(&token)?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Role guard state
pub struct RoleGuardState<U> {
    pub user_repo: Arc<U>,
    pub required: UserRole,
}

// Manual impl: `U` itself need not be Clone behind the Arc.
impl<U> Clone for RoleGuardState<U> {
    fn clone(&self) -> Self {
        Self {
            user_repo: self.user_repo.clone(),
            required: self.required,
        }
    }
}

/// Middleware that requires the caller (ownership-checked through the
/// `email` query parameter) to hold at least `required`
pub async fn require_role<U>(
    State(state): State<RoleGuardState<U>>,
    scope: OwnerScope,
    req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Send + Sync + 'static,
{
    let use_case = UserRoleUseCase::new(state.user_repo.clone());
    let staff = use_case.require(scope.email(), state.required).await?;

    tracing::debug!(
        email = %staff.email,
        role = %staff.user_role,
        path = %req.uri().path(),
        "Staff access granted"
    );

    Ok(next.run(req).await)
}
