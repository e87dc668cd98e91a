//! Auth Router
//!
//! Route groups are assembled by the binary. `protect` and `restrict` are
//! shared with the other domain crates so every protected route goes
//! through the same guard.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{GuardState, RoleGuardState, require_identity, require_role};

/// Put every route of `router` behind the credential guard
pub fn protect(router: Router, guard: &GuardState) -> Router {
    router.route_layer(middleware::from_fn_with_state(guard.clone(), require_identity))
}

/// Put every route of `router` behind the guard and a role floor.
/// Layers run outermost first, so the identity guard is added last.
pub fn restrict<U>(
    router: Router,
    guard: &GuardState,
    user_repo: Arc<U>,
    required: UserRole,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    let roles = RoleGuardState {
        user_repo,
        required,
    };

    router
        .route_layer(middleware::from_fn_with_state(roles, require_role::<U>))
        .route_layer(middleware::from_fn_with_state(guard.clone(), require_identity))
}

/// `/jwt` and `/logout` (public)
pub fn session_router<U>(state: AuthAppState<U>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/jwt", post(handlers::issue_token::<U>))
        .route("/logout", post(handlers::revoke_session::<U>))
        .with_state(state)
}

/// Member routes
pub fn user_router<U>(state: AuthAppState<U>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    let guard = state.guard();

    let router = Router::new()
        .route("/users", post(handlers::save_user::<U>))
        .route("/users/role", get(handlers::user_role::<U>))
        .with_state(state);

    protect(router, &guard)
}

/// Admin-only user management
pub fn admin_user_router<U>(state: AuthAppState<U>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    let guard = state.guard();
    let user_repo = state.user_repo.clone();

    let router = Router::new()
        .route("/admin/users", get(handlers::list_users::<U>))
        .route("/admin/users/{id}/role", patch(handlers::change_role::<U>))
        .route("/admin/users/{id}", delete(handlers::delete_user::<U>))
        .with_state(state);

    restrict(router, &guard, user_repo, UserRole::Admin)
}

/// All auth routes
pub fn auth_router<U>(state: AuthAppState<U>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .merge(session_router(state.clone()))
        .merge(user_router(state.clone()))
        .merge(admin_user_router(state))
}
