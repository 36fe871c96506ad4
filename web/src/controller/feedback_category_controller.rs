use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{feedback_categories, feedback_category as FeedbackCategoryApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET all Feedback Categories
#[utoipa::path(
    get,
    path = "/feedback_categories",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Feedback Categories", body = [feedback_categories::Model]),
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
    let categories = FeedbackCategoryApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), categories)))
}

/// GET a particular Feedback Category specified by its id.
#[utoipa::path(
    get,
    path = "/feedback_categories/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Feedback Category id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Feedback Category by its id", body = feedback_categories::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feedback Category not found"),
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
    debug!("GET Feedback Category by id: {id}");

    let category = FeedbackCategoryApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), category)))
}

/// CREATE a new Feedback Category
#[utoipa::path(
    post,
    path = "/feedback_categories",
    params(ApiVersion),
    request_body = feedback_categories::Model,
    responses(
        (status = 201, description = "Successfully created a new Feedback Category", body = feedback_categories::Model),
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
    Json(category_model): Json<feedback_categories::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new Feedback Category from: {category_model:?}");

    let category = FeedbackCategoryApi::create(app_state.db_conn_ref(), category_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), category)))
}
