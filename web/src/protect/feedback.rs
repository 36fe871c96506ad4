use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::protect::{authorize, Predicate, UserIsStaff};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};

/// Only professors and admins author feedback annotations.
pub(crate) async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks = vec![Predicate::new(UserIsStaff, vec![])];
    authorize(&app_state, claims, request, next, checks).await
}
