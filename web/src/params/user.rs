use serde::Deserialize;
use utoipa::ToSchema;

/// Credentials accepted by `POST /auth/login`. The academic id is the
/// student/staff number users sign in with, not the surrogate primary key.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::user::LoginParams)]
pub(crate) struct LoginParams {
    pub(crate) academic_id: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::user::UpdatePasswordParams)]
pub(crate) struct UpdatePasswordParams {
    pub(crate) password: String,
}
