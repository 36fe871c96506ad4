use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::protect::{authorize, Predicate, UserIsStaff};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};

/// The per-student submission roster exposes other students' grading state,
/// so it is staff-only. Intended to be given to
/// axum::middleware::from_fn_with_state in the router.
pub(crate) async fn submission_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks = vec![Predicate::new(UserIsStaff, vec![])];
    authorize(&app_state, claims, request, next, checks).await
}
