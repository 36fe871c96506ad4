use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{
    AuthErrorKind, DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound => {
                        (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
                    }
                    EntityErrorKind::Invalid => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE ENTITY").into_response()
                    }
                    // Raised only for duplicate academic ids at registration
                    EntityErrorKind::Conflict => {
                        (StatusCode::CONFLICT, "이미 존재하는 학번 / 교번 입니다.").into_response()
                    }
                    EntityErrorKind::Unauthenticated => {
                        (StatusCode::UNAUTHORIZED, "UNAUTHORIZED").into_response()
                    }
                    EntityErrorKind::Other(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                    }
                },
                InternalErrorKind::Config | InternalErrorKind::Other(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                }
            },
            DomainErrorKind::Auth(auth_error_kind) => match auth_error_kind {
                AuthErrorKind::MissingRefreshToken => {
                    (StatusCode::BAD_REQUEST, "No refresh token").into_response()
                }
                AuthErrorKind::MalformedToken => {
                    (StatusCode::BAD_REQUEST, "BAD REQUEST").into_response()
                }
                AuthErrorKind::TokenVersionMismatch => {
                    (StatusCode::BAD_REQUEST, "Token version doesn't match").into_response()
                }
                AuthErrorKind::Forbidden => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN").into_response()
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(kind: DomainErrorKind) -> StatusCode {
        Error(DomainError {
            source: None,
            error_kind: kind,
        })
        .into_response()
        .status()
    }

    #[test]
    fn entity_errors_map_to_expected_status_codes() {
        assert_eq!(
            status_for(DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::NotFound
            ))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Conflict
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Unauthenticated
            ))),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn token_errors_map_to_bad_request() {
        assert_eq!(
            status_for(DomainErrorKind::Auth(AuthErrorKind::MissingRefreshToken)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(DomainErrorKind::Auth(AuthErrorKind::TokenVersionMismatch)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(DomainErrorKind::Auth(AuthErrorKind::Forbidden)),
            StatusCode::FORBIDDEN
        );
    }
}
