//! Signing and verification of the platform's access and refresh tokens.
//!
//! Access tokens are short-lived and embed the user's id, role and
//! `token_version`. Refresh tokens are longer-lived, travel only in the
//! HttpOnly `jid` cookie, and embed the id and `token_version`. Neither is
//! persisted; refresh-token revocation works by bumping the user's version
//! counter so previously issued tokens fail the version comparison.

use crate::error::Error;
use chrono::Utc;
use entity::users;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use service::config::Config;

// re-export the Jwt struct from the entity module
pub use entity::jwt::Jwt;

pub mod claims;

use claims::{AccessClaims, RefreshClaims};

/// Generates a short-lived access token for the given user.
pub fn generate_access_token(config: &Config, user: &users::Model) -> Result<Jwt, Error> {
    let now = Utc::now().timestamp() as usize;
    let claims = AccessClaims {
        sub: user.id,
        role: user.role,
        token_version: user.token_version,
        iat: now,
        exp: now + config.access_token_ttl_secs as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.access_token_secret().as_bytes()),
    )?;

    Ok(Jwt {
        access_token: token,
        sub: user.id.to_string(),
    })
}

/// Generates a refresh token for the given user. The caller is responsible
/// for delivering it exclusively through the `jid` cookie.
pub fn generate_refresh_token(config: &Config, user: &users::Model) -> Result<String, Error> {
    let now = Utc::now().timestamp() as usize;
    let claims = RefreshClaims {
        sub: user.id,
        token_version: user.token_version,
        iat: now,
        exp: now + config.refresh_token_ttl_secs as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_token_secret().as_bytes()),
    )?)
}

/// Verifies an access token's signature and expiry and returns its claims.
pub fn verify_access_token(config: &Config, token: &str) -> Result<AccessClaims, Error> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_token_secret().as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

/// Verifies a refresh token's signature and expiry and returns its claims.
/// The embedded `token_version` still has to be compared against the user
/// row; that comparison lives in `crate::auth::refresh`.
pub fn verify_refresh_token(config: &Config, token: &str) -> Result<RefreshClaims, Error> {
    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_token_secret().as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthErrorKind, DomainErrorKind};
    use entity::roles::Role;

    fn test_user() -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: 7,
            academic_id: "S1001".to_owned(),
            first_name: "Noah".to_owned(),
            last_name: "Kim".to_owned(),
            email: "noah.kim@courseflow.dev".to_owned(),
            password: "hash".to_owned(),
            role: Role::Student,
            department_id: 1,
            token_version: 2,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn access_token_round_trips_its_claims() -> Result<(), Error> {
        let config = Config::default();
        let user = test_user();

        let jwt = generate_access_token(&config, &user)?;
        let claims = verify_access_token(&config, &jwt.access_token)?;

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.token_version, 2);

        Ok(())
    }

    #[test]
    fn refresh_token_round_trips_its_claims() -> Result<(), Error> {
        let config = Config::default();
        let user = test_user();

        let token = generate_refresh_token(&config, &user)?;
        let claims = verify_refresh_token(&config, &token)?;

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.token_version, 2);

        Ok(())
    }

    #[test]
    fn refresh_token_does_not_verify_as_an_access_token() {
        let config = Config::default();
        let token = generate_refresh_token(&config, &test_user()).unwrap();

        // Signed with a different secret, so signature validation fails.
        let result = verify_access_token(&config, &token);

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Auth(AuthErrorKind::MalformedToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = Config::default();

        let result = verify_refresh_token(&config, "not-a-jwt");

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Auth(AuthErrorKind::MalformedToken)
        ));
    }
}
