use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A signed access token as returned to clients. The refresh token never
/// appears in a response body; it travels only in the `jid` cookie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::jwt::Jwt)]
pub struct Jwt {
    pub access_token: String,
    /// User id the token was issued for
    pub sub: String,
}
