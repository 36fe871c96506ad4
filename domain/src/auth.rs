//! Identity service: registration, credential login, and refresh-token
//! rotation bound to the per-user `token_version` counter.

use crate::error::{AuthErrorKind, Error};
use crate::jwt::{self, Jwt};
use entity::users;
use entity_api::user as UserApi;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;

/// A freshly issued token pair. The refresh token must only ever reach the
/// client through the HttpOnly `jid` cookie.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: Jwt,
    pub refresh_token: String,
}

fn issue_tokens(config: &Config, user: &users::Model) -> Result<IssuedTokens, Error> {
    Ok(IssuedTokens {
        access_token: jwt::generate_access_token(config, user)?,
        refresh_token: jwt::generate_refresh_token(config, user)?,
    })
}

/// Registers a new user and logs them in. Fails with a conflict when the
/// academic id is already taken.
pub async fn register(
    db: &DatabaseConnection,
    config: &Config,
    new_user: users::Model,
) -> Result<(users::Model, IssuedTokens), Error> {
    let user = UserApi::create(db, new_user).await?;
    let tokens = issue_tokens(config, &user)?;

    info!("Registered user {} ({})", user.id, user.academic_id);

    Ok((user, tokens))
}

/// Authenticates an academic id / password pair and issues a token pair.
pub async fn login(
    db: &DatabaseConnection,
    config: &Config,
    academic_id: &str,
    password: &str,
) -> Result<(users::Model, IssuedTokens), Error> {
    let user = UserApi::find_by_academic_id(db, academic_id)
        .await?
        .ok_or_else(|| {
            warn!("Login failed, unknown academic id: {academic_id}");
            Error::from(entity_api::error::Error {
                source: None,
                error_kind: entity_api::error::EntityApiErrorKind::RecordUnauthenticated,
            })
        })?;

    UserApi::verify_password(password, &user.password).await?;

    let tokens = issue_tokens(config, &user)?;
    Ok((user, tokens))
}

/// Exchanges a refresh token (from the `jid` cookie) for a fresh access token
/// and a rotated refresh token.
///
/// The embedded `token_version` must equal the user's current counter; this
/// comparison is the sole revocation mechanism. A password change bumps the
/// counter, so every refresh token issued before it fails here.
pub async fn refresh(
    db: &DatabaseConnection,
    config: &Config,
    refresh_token: &str,
) -> Result<(users::Model, IssuedTokens), Error> {
    let claims = jwt::verify_refresh_token(config, refresh_token)?;

    let user = UserApi::find_by_id(db, claims.sub).await?;

    if user.token_version != claims.token_version {
        warn!(
            "Refresh rejected for user {}: token version {} != current {}",
            user.id, claims.token_version, user.token_version
        );
        return Err(Error::auth(AuthErrorKind::TokenVersionMismatch));
    }

    let tokens = issue_tokens(config, &user)?;
    Ok((user, tokens))
}

/// Replaces a user's password and bumps `token_version`, revoking every
/// outstanding refresh token.
pub async fn update_password(
    db: &DatabaseConnection,
    user_id: entity::Id,
    new_password: String,
) -> Result<users::Model, Error> {
    Ok(UserApi::update_password(db, user_id, new_password).await?)
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use entity::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(token_version: i32) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: 7,
            academic_id: "S1001".to_owned(),
            first_name: "Noah".to_owned(),
            last_name: "Kim".to_owned(),
            email: "noah.kim@courseflow.dev".to_owned(),
            password: UserApi::generate_hash("password".to_owned()),
            role: Role::Student,
            department_id: 1,
            token_version,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn refresh_succeeds_when_versions_match() -> Result<(), Error> {
        let config = Config::default();
        let user = test_user(2);
        let token = jwt::generate_refresh_token(&config, &user)?;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user.clone()]])
            .into_connection();

        let (refreshed_user, tokens) = refresh(&db, &config, &token).await?;

        assert_eq!(refreshed_user.id, user.id);
        assert!(!tokens.access_token.access_token.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn refresh_rejects_a_stale_token_version() {
        let config = Config::default();
        // Token minted at version 2, user has since been bumped to 3.
        let token = jwt::generate_refresh_token(&config, &test_user(2)).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![test_user(3)]])
            .into_connection();

        let result = refresh(&db, &config, &token).await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            crate::error::DomainErrorKind::Auth(AuthErrorKind::TokenVersionMismatch)
        ));
    }

    #[tokio::test]
    async fn refresh_fails_for_a_deleted_user() {
        let config = Config::default();
        let token = jwt::generate_refresh_token(&config, &test_user(0)).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(Vec::<Vec<users::Model>>::from([vec![]]))
            .into_connection();

        let result = refresh(&db, &config, &token).await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            crate::error::DomainErrorKind::Internal(crate::error::InternalErrorKind::Entity(
                crate::error::EntityErrorKind::NotFound
            ))
        ));
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let config = Config::default();
        let user = test_user(0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user]])
            .into_connection();

        let result = login(&db, &config, "S1001", "wrong-password").await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            crate::error::DomainErrorKind::Internal(crate::error::InternalErrorKind::Entity(
                crate::error::EntityErrorKind::Unauthenticated
            ))
        ));
    }
}
