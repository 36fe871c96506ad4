use crate::assignments::Model;
use crate::error::Error;
use crate::Id;
use entity_api::assignment;
use entity_api::mutate::IntoUpdateMap;
use sea_orm::DatabaseConnection;

pub use entity_api::assignment::{create, delete_by_id, find_all, find_by_id, SubmissionStatus};

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl IntoUpdateMap,
) -> Result<Model, Error> {
    Ok(assignment::update(db, id, params.into_update_map()).await?)
}

/// Roster view: one row per student enrolled in the assignment's class,
/// whether or not they ever submitted.
pub async fn submission_status(
    db: &DatabaseConnection,
    assignment_id: Id,
) -> Result<Vec<SubmissionStatus>, Error> {
    Ok(assignment::submission_status(db, assignment_id).await?)
}
