//! Claim payloads for the platform's access and refresh tokens.

use entity::roles::Role;
use entity::Id;
use serde::{Deserialize, Serialize};

/// Claims carried by a short-lived access token. Stateless; nothing about the
/// token is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: Id,
    pub role: Role,
    /// The user's token_version at issue time
    pub token_version: i32,
    pub iat: usize,
    pub exp: usize,
}

/// Claims carried by a refresh token, delivered only in the `jid` cookie.
/// Validity is decided by comparing `token_version` against the user row's
/// current counter; bumping the counter revokes every outstanding token
/// without any server-side token store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User id
    pub sub: Id,
    pub token_version: i32,
    pub iat: usize,
    pub exp: usize,
}
