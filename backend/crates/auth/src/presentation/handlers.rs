//! HTTP Handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum_extra::extract::cookie::CookieJar;
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenService;
use crate::application::{ManageUsersUseCase, SaveUserInput, SaveUserUseCase, UserRoleUseCase};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangeRoleRequest, IssueTokenRequest, IssueTokenResponse, ListUsersQuery, SaveUserRequest,
    SaveUserResponse, SuccessResponse, UserResponse, UserRoleResponse,
};
use crate::presentation::extract::{Identity, OwnerScope};
use crate::presentation::middleware::GuardState;

/// Shared state for auth handlers
pub struct AuthAppState<U> {
    pub user_repo: Arc<U>,
    pub tokens: Arc<SessionTokenService>,
    pub config: Arc<AuthConfig>,
}

impl<U> AuthAppState<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            tokens: Arc::new(SessionTokenService::new(&config)),
            config: Arc::new(config),
        }
    }

    /// State for [`require_identity`](super::middleware::require_identity)
    pub fn guard(&self) -> GuardState {
        GuardState::new(self.tokens.clone(), self.config.cookie.name.as_str())
    }
}

impl<U> Clone for AuthAppState<U> {
    fn clone(&self) -> Self {
        Self {
            user_repo: self.user_repo.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// POST /jwt
pub async fn issue_token<U>(
    State(state): State<AuthAppState<U>>,
    jar: CookieJar,
    payload: Result<Json<IssueTokenRequest>, JsonRejection>,
) -> AuthResult<(CookieJar, Json<IssueTokenResponse>)>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let email = Email::new(req.email)?;

    let issued = state.tokens.issue(&email)?;

    tracing::info!(email = %email, expires_at = %issued.expires_at, "Session issued");

    let jar = jar.add(state.config.cookie.issue(issued.token.clone()));

    Ok((
        jar,
        Json(IssueTokenResponse {
            success: true,
            token: issued.token,
        }),
    ))
}

/// POST /logout
///
/// Clears the cookie with the attributes it was issued with. The token
/// itself stays valid until it expires.
pub async fn revoke_session<U>(
    State(state): State<AuthAppState<U>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>)
where
    U: UserRepository + Send + Sync + 'static,
{
    tracing::info!("Session cookie cleared");

    (
        jar.add(state.config.cookie.removal()),
        Json(SuccessResponse::ok()),
    )
}

// ============================================================================
// Users
// ============================================================================

/// POST /users
pub async fn save_user<U>(
    State(state): State<AuthAppState<U>>,
    identity: Identity,
    payload: Result<Json<SaveUserRequest>, JsonRejection>,
) -> AuthResult<Json<SaveUserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let email = identity.authorize(&req.email)?;

    let use_case = SaveUserUseCase::new(state.user_repo.clone());
    let output = use_case
        .execute(SaveUserInput {
            email,
            name: req.name,
            photo_url: req.photo_url,
        })
        .await?;

    Ok(Json(SaveUserResponse {
        created: output.created,
        user: output.user.into(),
    }))
}

/// GET /users/role?email=
pub async fn user_role<U>(
    State(state): State<AuthAppState<U>>,
    scope: OwnerScope,
) -> AuthResult<Json<UserRoleResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let use_case = UserRoleUseCase::new(state.user_repo.clone());
    let role = use_case.role_of(scope.email()).await?;

    Ok(Json(UserRoleResponse { role }))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/users?email=&role=
pub async fn list_users<U>(
    State(state): State<AuthAppState<U>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let role = query.role.as_deref().map(UserRole::from_str).transpose()?;

    let use_case = ManageUsersUseCase::new(state.user_repo.clone());
    let users = use_case.list(role).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PATCH /admin/users/{id}/role?email=
pub async fn change_role<U>(
    State(state): State<AuthAppState<U>>,
    Path(user_id): Path<String>,
    payload: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let user_id = UserId::from_str(&user_id)?;
    let Json(req) = payload?;
    let role = UserRole::from_str(&req.role)?;

    let use_case = UserRoleUseCase::new(state.user_repo.clone());
    let user = use_case.change_role(&user_id, role).await?;

    Ok(Json(user.into()))
}

/// DELETE /admin/users/{id}?email=
pub async fn delete_user<U>(
    State(state): State<AuthAppState<U>>,
    Path(user_id): Path<String>,
) -> AuthResult<Json<SuccessResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let user_id = UserId::from_str(&user_id)?;

    let use_case = ManageUsersUseCase::new(state.user_repo.clone());
    use_case.delete(&user_id).await?;

    Ok(Json(SuccessResponse::ok()))
}
