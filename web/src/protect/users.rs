use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::protect::{Predicate, UserIsAdmin, UserIsSelf};
use crate::AppState;
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use domain::Id;

/// A user may change their own password; an admin may change anyone's.
/// Unlike `authorize`, the two rules here are OR-ed rather than AND-ed.
pub(crate) async fn update_password(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let is_self = Predicate::new(UserIsSelf, vec![user_id])
        .check(&app_state, &claims)
        .await;
    let is_admin = Predicate::new(UserIsAdmin, vec![])
        .check(&app_state, &claims)
        .await;

    if is_self || is_admin {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, "FORBIDDEN").into_response()
    }
}
