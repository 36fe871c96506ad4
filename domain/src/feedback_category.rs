use crate::error::Error;
use crate::feedback_categories::Model;
use crate::Id;
use sea_orm::DatabaseConnection;

pub use entity_api::feedback_category::{create, find_all};

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(entity_api::feedback_category::find_by_id(db, id).await?)
}
