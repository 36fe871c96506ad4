use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{controller::ApiResponse, params::user::UpdatePasswordParams};
use crate::{AppState, Error};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::{auth as AuthApi, Id};
use log::*;
use service::config::ApiVersion;

/// UPDATE a user's password.
///
/// Besides replacing the hash this bumps the user's `token_version`, which
/// revokes every outstanding refresh token; other devices must log in again.
#[utoipa::path(
    put,
    path = "/users/{user_id}/password",
    params(
        ApiVersion,
        ("user_id" = Id, Path, description = "User id whose password to replace"),
    ),
    request_body = UpdatePasswordParams,
    responses(
        (status = 204, description = "Successfully updated the User's password"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_password(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(user_id): Path<Id>,
    Json(params): Json<UpdatePasswordParams>,
) -> Result<impl IntoResponse, Error> {
    info!("UPDATE password for user: {user_id}");

    AuthApi::update_password(app_state.db_conn_ref(), user_id, params.password).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
