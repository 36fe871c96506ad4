use crate::classes::Model;
use crate::error::Error;
use crate::Id;
use sea_orm::DatabaseConnection;

pub use entity_api::class::{create, find_all};

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(entity_api::class::find_by_id(db, id).await?)
}
