use crate::error::Error;
use crate::Id;
use entity_api::feedback_entry;
use sea_orm::DatabaseConnection;

// The entity's Model doubles as the domain representation, as with the other
// entities re-exported from `lib.rs`; it lives here because this module and
// the entity module share the name `feedback`.
pub use entity::feedback::{Column, Entity, Model};

pub use entity_api::feedback_entry::{create, delete_by_id, find_all, find_by_id};

pub async fn find_by_submission(
    db: &DatabaseConnection,
    submission_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(feedback_entry::find_by_submission(db, submission_id).await?)
}
