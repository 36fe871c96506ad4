use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::feedback::{CreateParams, IndexParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{feedback as FeedbackApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET Feedback annotations, optionally filtered by submission.
#[utoipa::path(
    get,
    path = "/feedback",
    params(
        ApiVersion,
        IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved Feedback", body = [domain::feedback::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    let feedback = match params.submission_id {
        Some(submission_id) => {
            FeedbackApi::find_by_submission(app_state.db_conn_ref(), submission_id).await?
        }
        None => FeedbackApi::find_all(app_state.db_conn_ref()).await?,
    };

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), feedback)))
}

/// GET a particular Feedback annotation specified by its id.
#[utoipa::path(
    get,
    path = "/feedback/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Feedback id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Feedback by its id", body = domain::feedback::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feedback not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Feedback by id: {id}");

    let feedback = FeedbackApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), feedback)))
}

/// CREATE a new Feedback annotation on a submission.
///
/// The professor id is taken from the access token, never from the body.
#[utoipa::path(
    post,
    path = "/feedback",
    params(ApiVersion),
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created new Feedback", body = domain::feedback::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "A feedback category id does not exist"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(claims): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new Feedback from: {params:?}");

    let now = chrono::Utc::now();
    let feedback_model = domain::feedback::Model {
        id: Default::default(),
        submission_id: params.submission_id,
        professor_id: claims.sub,
        start: params.start,
        end: params.end,
        selected_source_text: params.selected_source_text,
        comment: params.comment,
        staged: params.staged,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let feedback = FeedbackApi::create(
        app_state.db_conn_ref(),
        feedback_model,
        params.category_ids,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), feedback)))
}

/// DELETE a Feedback annotation specified by its id
#[utoipa::path(
    delete,
    path = "/feedback/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Feedback id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Feedback", body = domain::feedback::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feedback not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Feedback by id: {id}");

    let feedback = FeedbackApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), feedback)))
}
