use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::assignment::{CreateParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{assignment as AssignmentApi, assignments, Id};
use log::*;
use service::config::ApiVersion;

/// GET all Assignments
#[utoipa::path(
    get,
    path = "/assignments",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Assignments", body = [assignments::Model]),
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
) -> Result<impl IntoResponse, Error> {
    let assignments = AssignmentApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), assignments)))
}

/// GET a particular Assignment specified by its id.
#[utoipa::path(
    get,
    path = "/assignments/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Assignment id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Assignment by its id", body = assignments::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Assignment not found"),
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
    debug!("GET Assignment by id: {id}");

    let assignment = AssignmentApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), assignment)))
}

/// CREATE a new Assignment connected to its feedback categories
#[utoipa::path(
    post,
    path = "/assignments",
    params(ApiVersion),
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created a new Assignment", body = assignments::Model),
        (status = 401, description = "Unauthorized"),
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
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new Assignment from: {params:?}");

    let now = chrono::Utc::now();
    let assignment_model = assignments::Model {
        id: Default::default(),
        class_id: params.class_id,
        name: params.name,
        description: params.description,
        due_date: params.due_date,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let assignment = AssignmentApi::create(
        app_state.db_conn_ref(),
        assignment_model,
        params.feedback_category_ids,
    )
    .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        assignment,
    )))
}

/// UPDATE an Assignment specified by its id
#[utoipa::path(
    patch,
    path = "/assignments/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Assignment id to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the Assignment", body = assignments::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Assignment not found"),
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
    debug!("UPDATE Assignment by id: {id}");

    let assignment = AssignmentApi::update(app_state.db_conn_ref(), id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), assignment)))
}

/// DELETE an Assignment specified by its id
#[utoipa::path(
    delete,
    path = "/assignments/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Assignment id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Assignment", body = assignments::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Assignment not found"),
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
    debug!("DELETE Assignment by id: {id}");

    let assignment = AssignmentApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), assignment)))
}

/// GET the per-student submission roster for an Assignment.
///
/// Returns one row per enrolled student whether or not they submitted: their
/// staged submission id (if any), its graded flag and the draft's play count
/// and last update time. Staff only.
#[utoipa::path(
    get,
    path = "/assignments/{id}/submissions",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Assignment id to build the roster for")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the roster", body = [domain::assignment::SubmissionStatus]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Assignment not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submission_status(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET submission status roster for Assignment: {id}");

    let roster = AssignmentApi::submission_status(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), roster)))
}
