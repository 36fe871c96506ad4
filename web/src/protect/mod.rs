//! This module provides protection mechanisms for various resources in the web application.
//!
//! It includes submodules for authorizing access to resources. Each submodule contains the necessary logic to protect
//! the corresponding resources, ensuring that only authorized users can access or modify them.
//!
//! The protection mechanisms are designed to be flexible and extensible, allowing for the addition
//! of new resources and protection strategies as needed. By organizing the protection logic into
//! separate submodules, we can maintain a clear and modular structure, making the codebase easier
//! to understand and maintain.

pub(crate) mod assignments;
pub(crate) mod feedback;
pub(crate) mod users;

use crate::AppState;
use async_trait::async_trait;
use axum::{extract::Request, http::StatusCode, middleware::Next, response::IntoResponse};
use domain::jwt::claims::AccessClaims;
use domain::Id;

/// Trait representing a single authorization rule.
///
/// Implementors answer **"is the authenticated user allowed to proceed?"**.
/// The rule receives:
/// * shared application state (`AppState`)
/// * the verified [`AccessClaims`] of the requesting user
/// * any additional [`Id`] parameters supplied by the caller.
///
/// Example:
/// ```rust,ignore
/// #[async_trait]
/// impl Check for UserIsStaff {
///     async fn eval(&self, _app: &AppState, claims: &AccessClaims, _args: Vec<Id>) -> bool {
///         claims.role.is_staff()
///     }
/// }
/// ```
#[async_trait]
pub trait Check: Send + Sync {
    async fn eval(&self, app: &AppState, claims: &AccessClaims, args: Vec<Id>) -> bool;
}

/// Pairs a [`Check`] implementation with the concrete arguments that the rule
/// should receive when evaluated.
///
/// Most callers will create predicates with the convenience constructor
/// [`Predicate::new`] and pass the vector to the [`authorize`] middleware.
pub(crate) struct Predicate {
    predicate: Box<dyn Check>,
    args: Vec<Id>,
}

impl Predicate {
    pub(crate) fn new<C: Check + 'static>(predicate: C, args: Vec<Id>) -> Self {
        Self {
            predicate: Box::new(predicate),
            args,
        }
    }

    pub(crate) async fn check(&self, app_state: &AppState, claims: &AccessClaims) -> bool {
        self.predicate.eval(app_state, claims, self.args.clone()).await
    }
}

/// Axum middleware that enforces one or more [`Predicate`]s.
///
/// Each predicate is evaluated in the order supplied; if any rule returns
/// `false` the request is aborted with **403 FORBIDDEN**.  When all rules
/// pass the wrapped handler (`next`) is executed.
pub(crate) async fn authorize(
    app_state: &AppState,
    claims: AccessClaims,
    request: Request,
    next: Next,
    checks: Vec<Predicate>,
) -> impl IntoResponse {
    for check in checks {
        if !check.check(app_state, &claims).await {
            return (StatusCode::FORBIDDEN, "FORBIDDEN").into_response();
        }
    }
    next.run(request).await
}

/// Professors and admins only. Students fail this rule; grading, rosters and
/// feedback authoring are staff concerns.
pub struct UserIsStaff;

#[async_trait]
impl Check for UserIsStaff {
    async fn eval(&self, _app_state: &AppState, claims: &AccessClaims, _args: Vec<Id>) -> bool {
        claims.role.is_staff()
    }
}

/// Passes when the path's user id is the requesting user's own id.
pub struct UserIsSelf;

#[async_trait]
impl Check for UserIsSelf {
    async fn eval(&self, _app_state: &AppState, claims: &AccessClaims, args: Vec<Id>) -> bool {
        let user_id = args[0];
        claims.sub == user_id
    }
}

/// Admin role only.
pub struct UserIsAdmin;

#[async_trait]
impl Check for UserIsAdmin {
    async fn eval(&self, _app_state: &AppState, claims: &AccessClaims, _args: Vec<Id>) -> bool {
        claims.role == domain::roles::Role::Admin
    }
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use domain::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::Config;
    use std::sync::Arc;

    fn claims(sub: Id, role: Role) -> AccessClaims {
        AccessClaims {
            sub,
            role,
            token_version: 0,
            iat: 0,
            exp: usize::MAX,
        }
    }

    fn app_state() -> AppState {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        AppState::new(Config::default(), &db)
    }

    #[tokio::test]
    async fn staff_rule_rejects_students() {
        let app_state = app_state();

        assert!(
            UserIsStaff
                .eval(&app_state, &claims(1, Role::Professor), vec![])
                .await
        );
        assert!(
            !UserIsStaff
                .eval(&app_state, &claims(1, Role::Student), vec![])
                .await
        );
    }

    #[tokio::test]
    async fn self_rule_compares_the_path_id() {
        let app_state = app_state();
        let claims = claims(7, Role::Student);

        assert!(UserIsSelf.eval(&app_state, &claims, vec![7]).await);
        assert!(!UserIsSelf.eval(&app_state, &claims, vec![8]).await);
    }
}
