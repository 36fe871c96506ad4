use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::jwt::claims::AccessClaims;

/// The verified access-token claims of the requesting user.
///
/// `require_auth` verifies the bearer token and stores the claims in the
/// request extensions; this extractor only picks them up again. Using it on a
/// route that is not behind `require_auth` rejects with 401.
pub(crate) struct AuthenticatedUser(pub AccessClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AccessClaims>() {
            Some(claims) => Ok(AuthenticatedUser(claims.clone())),
            None => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        }
    }
}
