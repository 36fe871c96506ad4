use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::submission::{BatchUpdateParams, IndexParams, UpdateParams};
use crate::{AppState, Error};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use domain::{submission as SubmissionApi, submissions, Id};
use log::*;
use service::config::ApiVersion;

/// GET all Submissions, optionally filtered by student, assignment and the
/// staged flag.
#[utoipa::path(
    get,
    path = "/submissions",
    params(
        ApiVersion,
        IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved Submissions", body = [submissions::Model]),
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
    let submissions = SubmissionApi::find_by(app_state.db_conn_ref(), params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), submissions)))
}

/// GET a particular Submission specified by its id.
#[utoipa::path(
    get,
    path = "/submissions/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Submission id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Submission by its id", body = submissions::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
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
    debug!("GET Submission by id: {id}");

    let submission = SubmissionApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), submission)))
}

/// CREATE a new draft Submission
#[utoipa::path(
    post,
    path = "/submissions",
    params(ApiVersion),
    request_body = submissions::Model,
    responses(
        (status = 201, description = "Successfully created a new Submission", body = submissions::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(submission_model): Json<submissions::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new Submission from: {submission_model:?}");

    let submission = SubmissionApi::create(app_state.db_conn_ref(), submission_model).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        submission,
    )))
}

/// UPDATE a Submission specified by its id.
///
/// `sequential_regions` distinguishes an omitted field (leave as is) from an
/// explicit `null` (clear the column).
#[utoipa::path(
    patch,
    path = "/submissions/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Submission id to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the Submission", body = submissions::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("UPDATE Submission by id: {id}");

    let submission = SubmissionApi::update(app_state.db_conn_ref(), id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), submission)))
}

/// PATCH a single partial update onto many Submissions at once.
///
/// Returns the number of rows actually updated. Whether a missing id is
/// skipped or fails the whole batch follows the server's `batch_atomic`
/// configuration.
#[utoipa::path(
    patch,
    path = "/submissions/batch",
    params(ApiVersion),
    request_body = BatchUpdateParams,
    responses(
        (status = 200, description = "Successfully applied the batch update", body = u64),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "A Submission id does not exist (atomic mode only)"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_batch(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<BatchUpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PATCH batch update for Submissions: {:?}", params.ids);

    let updated = SubmissionApi::update_many(
        app_state.db_conn_ref(),
        &app_state.config,
        params.ids,
        params.dto,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), updated)))
}

/// DELETE a Submission specified by its id
#[utoipa::path(
    delete,
    path = "/submissions/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Submission id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Submission", body = submissions::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
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
    debug!("DELETE Submission by id: {id}");

    let submission = SubmissionApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), submission)))
}

/// POST promote a draft Submission to its staged counterpart.
///
/// Creates the staged row on first call and overwrites it in place on every
/// later call, preserving the staged row's id, graded flag and attached
/// feedback. Returns the staged Submission.
#[utoipa::path(
    post,
    path = "/submissions/{id}/stage",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Draft Submission id to stage")
    ),
    responses(
        (status = 200, description = "Successfully staged the Submission", body = submissions::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn stage(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    info!("STAGE Submission by id: {id}");

    let staged = SubmissionApi::stage(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), staged)))
}

/// GET a Submission's audio recording as a raw `audio/webm` body.
#[utoipa::path(
    get,
    path = "/submissions/{id}/audio",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Submission id whose audio to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the audio blob", content_type = "audio/webm"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission or audio not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read_audio(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET audio for Submission: {id}");

    let bytes = SubmissionApi::find_audio(app_state.db_conn_ref(), id).await?;

    Ok(([(header::CONTENT_TYPE, "audio/webm")], bytes))
}

/// POST a Submission's audio recording.
///
/// The body is the raw blob; it is buffered fully in memory and stored on the
/// draft row.
#[utoipa::path(
    post,
    path = "/submissions/{id}/audio",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Submission id to attach the audio to")
    ),
    request_body(content_type = "audio/webm"),
    responses(
        (status = 200, description = "Successfully stored the audio blob", body = submissions::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn store_audio(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    debug!("POST audio for Submission {id} ({} bytes)", body.len());

    let submission = SubmissionApi::store_audio(app_state.db_conn_ref(), id, body.to_vec()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), submission)))
}
