use crate::{
    controller::health_check_controller, middleware::auth::require_auth, params, protect, AppState,
};
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::controller::{
    assignment_controller, auth_controller, class_controller, feedback_category_controller,
    feedback_controller, submission_controller, user,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "CourseFlow Platform API"
        ),
        paths(
            assignment_controller::index,
            assignment_controller::read,
            assignment_controller::create,
            assignment_controller::update,
            assignment_controller::delete,
            assignment_controller::submission_status,
            auth_controller::register,
            auth_controller::login,
            auth_controller::logout,
            auth_controller::refresh_token,
            class_controller::index,
            class_controller::read,
            class_controller::create,
            feedback_category_controller::index,
            feedback_category_controller::read,
            feedback_category_controller::create,
            feedback_controller::index,
            feedback_controller::read,
            feedback_controller::create,
            feedback_controller::delete,
            submission_controller::index,
            submission_controller::read,
            submission_controller::create,
            submission_controller::update,
            submission_controller::update_batch,
            submission_controller::delete,
            submission_controller::stage,
            submission_controller::read_audio,
            submission_controller::store_audio,
            user::password_controller::update_password,
        ),
        components(
            schemas(
                domain::assignments::Model,
                domain::classes::Model,
                domain::feedback::Model,
                domain::feedback_categories::Model,
                domain::submissions::Model,
                domain::users::Model,
                domain::assignment::SubmissionStatus,
                domain::jwt::Jwt,
                params::assignment::CreateParams,
                params::assignment::UpdateParams,
                params::feedback::CreateParams,
                params::submission::UpdateParams,
                params::submission::BatchUpdateParams,
                params::user::LoginParams,
                params::user::UpdatePasswordParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "courseflow_platform", description = "CourseFlow Assignment & Feedback API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Access tokens travel as a bearer header; the refresh token only ever lives
// in the HttpOnly jid cookie.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
            components.add_security_scheme(
                "refresh_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "jid",
                    "Refresh token returned from successful login via Set-Cookie header",
                ))),
            );
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(assignment_routes(app_state.clone()))
        .merge(auth_routes(app_state.clone()))
        .merge(class_routes(app_state.clone()))
        .merge(feedback_category_routes(app_state.clone()))
        .merge(feedback_routes(app_state.clone()))
        .merge(health_routes())
        .merge(submission_routes(app_state.clone()))
        .merge(user_password_routes(app_state.clone()))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes())
}

fn assignment_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/assignments", get(assignment_controller::index))
        .route("/assignments", post(assignment_controller::create))
        .route("/assignments/:id", get(assignment_controller::read))
        .route("/assignments/:id", patch(assignment_controller::update))
        .route("/assignments/:id", delete(assignment_controller::delete))
        .merge(
            // GET /assignments/:id/submissions (roster view, staff only)
            Router::new()
                .route(
                    "/assignments/:id/submissions",
                    get(assignment_controller::submission_status),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::assignments::submission_status,
                )),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn auth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth_controller::register))
        .route("/auth/login", post(auth_controller::login))
        .route("/auth/logout", post(auth_controller::logout))
        .route("/auth/refresh-token", post(auth_controller::refresh_token))
        .with_state(app_state)
}

fn class_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/classes", get(class_controller::index))
        .route("/classes", post(class_controller::create))
        .route("/classes/:id", get(class_controller::read))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn feedback_category_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/feedback_categories",
            get(feedback_category_controller::index),
        )
        .route(
            "/feedback_categories",
            post(feedback_category_controller::create),
        )
        .route(
            "/feedback_categories/:id",
            get(feedback_category_controller::read),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn feedback_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/feedback", get(feedback_controller::index))
        .route("/feedback/:id", get(feedback_controller::read))
        .route("/feedback/:id", delete(feedback_controller::delete))
        .merge(
            // POST /feedback
            Router::new()
                .route("/feedback", post(feedback_controller::create))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::feedback::create,
                )),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn submission_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/submissions", get(submission_controller::index))
        .route("/submissions", post(submission_controller::create))
        // Registered before /submissions/:id so "batch" is not parsed as an id
        .route(
            "/submissions/batch",
            patch(submission_controller::update_batch),
        )
        .route("/submissions/:id", get(submission_controller::read))
        .route("/submissions/:id", patch(submission_controller::update))
        .route("/submissions/:id", delete(submission_controller::delete))
        .route(
            "/submissions/:id/stage",
            post(submission_controller::stage),
        )
        .route(
            "/submissions/:id/audio",
            get(submission_controller::read_audio),
        )
        .route(
            "/submissions/:id/audio",
            post(submission_controller::store_audio),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn user_password_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/users/:user_id/password",
            put(user::password_controller::update_password),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            protect::users::update_password,
        ))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

pub fn static_routes() -> Router {
    Router::new().nest_service("/", ServeDir::new("./"))
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        define_routes(AppState::new(Config::default(), &db))
    }

    #[tokio::test]
    async fn health_endpoint_needs_no_authentication() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"healthy");
    }

    #[tokio::test]
    async fn submission_routes_reject_anonymous_requests() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/submissions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The roster lives under /assignments/:id/submissions; an anonymous
    // request proves the route is registered (404 would mean it is not).
    #[tokio::test]
    async fn roster_route_is_registered_under_assignment_submissions() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/assignments/1/submissions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_token_route_uses_the_hyphenated_path() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/refresh-token")
                    .header(
                        service::config::ApiVersion::field_name(),
                        service::config::ApiVersion::default_version(),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // No jid cookie is a 400 from the handler; a 404/405 would mean the
        // route is not registered under this path.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"No refresh token");
    }
}
