use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::*;

/// Authentication middleware that returns 401 Unauthorized for unauthenticated requests.
///
/// Expects an `Authorization: Bearer <access token>` header, verifies the
/// token's signature and expiry, and stores the decoded
/// [`domain::jwt::claims::AccessClaims`] in the request extensions for the
/// `AuthenticatedUser` extractor and the `protect` rules downstream.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer_token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match bearer_token {
        Some(token) => token,
        None => {
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
    };

    match domain::jwt::verify_access_token(&app_state.config, token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => {
            debug!("Access token rejected: {err:?}");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use domain::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "authenticated"
    }

    fn test_app() -> (Router, Config) {
        let config = Config::default();
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let app_state = AppState::new(config.clone(), &db);

        let app = Router::new()
            .route("/test", get(test_handler))
            .route_layer(from_fn_with_state(app_state.clone(), require_auth))
            .with_state(app_state);

        (app, config)
    }

    fn test_user() -> domain::users::Model {
        let now = chrono::Utc::now();
        domain::users::Model {
            id: 7,
            academic_id: "S1001".to_owned(),
            first_name: "Noah".to_owned(),
            last_name: "Kim".to_owned(),
            email: "noah.kim@courseflow.dev".to_owned(),
            password: "hash".to_owned(),
            role: Role::Student,
            department_id: 1,
            token_version: 0,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn returns_401_without_an_authorization_header() {
        let (app, _config) = test_app();

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn returns_401_for_a_garbage_token() {
        let (app, _config) = test_app();

        let request = Request::builder()
            .uri("/test")
            .header(AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn lets_a_valid_bearer_token_through() {
        let (app, config) = test_app();
        let jwt = domain::jwt::generate_access_token(&config, &test_user()).unwrap();

        let request = Request::builder()
            .uri("/test")
            .header(AUTHORIZATION, format!("Bearer {}", jwt.access_token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
