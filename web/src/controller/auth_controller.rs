use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::user::LoginParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, StatusCode,
};
use axum::response::IntoResponse;
use axum::Json;
use domain::error::{AuthErrorKind, Error as DomainError};
use domain::jwt::Jwt;
use domain::{auth as AuthApi, users};
use log::*;
use service::config::{ApiVersion, Config};

/// Name of the HttpOnly cookie carrying the refresh token. The cookie is
/// scoped to `/auth` so it only travels on auth endpoints.
const REFRESH_COOKIE: &str = "jid";
const REFRESH_COOKIE_PATH: &str = "/auth";

fn refresh_cookie(config: &Config, refresh_token: &str) -> String {
    let mut cookie = format!(
        "{REFRESH_COOKIE}={refresh_token}; HttpOnly; SameSite=Lax; \
         Path={REFRESH_COOKIE_PATH}; Max-Age={}",
        config.refresh_token_ttl_secs
    );
    if config.is_production() {
        cookie.push_str("; Secure");
    }
    cookie
}

fn clear_refresh_cookie() -> String {
    format!("{REFRESH_COOKIE}=; HttpOnly; SameSite=Lax; Path={REFRESH_COOKIE_PATH}; Max-Age=0")
}

/// Picks the refresh token out of the request's `Cookie` header.
fn refresh_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;

    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == REFRESH_COOKIE).then(|| value.to_string())
    })
}

/// POST register a new user and sign them in.
#[utoipa::path(
    post,
    path = "/auth/register",
    params(ApiVersion),
    request_body = users::Model,
    responses(
        (status = 201, description = "Successfully registered; access token in the body, refresh token in the jid cookie", body = Jwt),
        (status = 409, description = "The academic id is already taken"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn register(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(user_model): Json<users::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("REGISTER new user: {}", user_model.academic_id);

    let (_user, tokens) =
        AuthApi::register(app_state.db_conn_ref(), &app_state.config, user_model).await?;

    Ok((
        [(
            SET_COOKIE,
            refresh_cookie(&app_state.config, &tokens.refresh_token),
        )],
        Json(ApiResponse::new(
            StatusCode::CREATED.into(),
            tokens.access_token,
        )),
    ))
}

/// POST login with an academic id and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    params(ApiVersion),
    request_body = LoginParams,
    responses(
        (status = 200, description = "Successfully logged in; access token in the body, refresh token in the jid cookie", body = Jwt),
        (status = 401, description = "Unknown academic id or wrong password"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn login(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<LoginParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("LOGIN user: {}", params.academic_id);

    let (_user, tokens) = AuthApi::login(
        app_state.db_conn_ref(),
        &app_state.config,
        &params.academic_id,
        &params.password,
    )
    .await?;

    Ok((
        [(
            SET_COOKIE,
            refresh_cookie(&app_state.config, &tokens.refresh_token),
        )],
        Json(ApiResponse::new(StatusCode::OK.into(), tokens.access_token)),
    ))
}

/// POST logout: clears the jid cookie.
///
/// Outstanding access tokens stay valid until they expire; the user's
/// `token_version` is only bumped by a password change.
#[utoipa::path(
    post,
    path = "/auth/logout",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully logged out"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn logout(CompareApiVersion(_v): CompareApiVersion) -> Result<impl IntoResponse, Error> {
    Ok((
        [(SET_COOKIE, clear_refresh_cookie())],
        Json(ApiResponse::<()>::no_content(StatusCode::OK.into())),
    ))
}

/// POST exchange the jid cookie for a fresh token pair.
///
/// Fails with 400 when the cookie is missing, the token is malformed or
/// expired, or its embedded `token_version` no longer matches the user's
/// current counter.
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully refreshed; new access token in the body, rotated refresh token in the jid cookie", body = Jwt),
        (status = 400, description = "Missing, malformed or revoked refresh token"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn refresh_token(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let token = refresh_token_from_headers(&headers).ok_or_else(|| {
        Error::from(DomainError::auth(AuthErrorKind::MissingRefreshToken))
    })?;

    let (_user, tokens) =
        AuthApi::refresh(app_state.db_conn_ref(), &app_state.config, &token).await?;

    Ok((
        [(
            SET_COOKIE,
            refresh_cookie(&app_state.config, &tokens.refresh_token),
        )],
        Json(ApiResponse::new(StatusCode::OK.into(), tokens.access_token)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn refresh_token_is_read_from_the_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; jid=some.refresh.token; lang=ko"),
        );

        assert_eq!(
            refresh_token_from_headers(&headers),
            Some("some.refresh.token".to_string())
        );
    }

    #[test]
    fn missing_jid_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));

        assert_eq!(refresh_token_from_headers(&headers), None);
        assert_eq!(refresh_token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let cookie = clear_refresh_cookie();

        assert!(cookie.starts_with("jid=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
    }
}
