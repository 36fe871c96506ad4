use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{class as ClassApi, classes, Id};
use log::*;
use service::config::ApiVersion;

/// GET all Classes
#[utoipa::path(
    get,
    path = "/classes",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Classes", body = [classes::Model]),
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
    let classes = ClassApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), classes)))
}

/// GET a particular Class specified by its id.
#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Class id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Class by its id", body = classes::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class not found"),
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
    debug!("GET Class by id: {id}");

    let class = ClassApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), class)))
}

/// CREATE a new Class
#[utoipa::path(
    post,
    path = "/classes",
    params(ApiVersion),
    request_body = classes::Model,
    responses(
        (status = 201, description = "Successfully created a new Class", body = classes::Model),
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
    Json(class_model): Json<classes::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new Class from: {class_model:?}");

    let class = ClassApi::create(app_state.db_conn_ref(), class_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), class)))
}
