use super::error::{EntityApiErrorKind, Error};
use entity::feedback_categories::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, Set};

pub async fn create(db: &impl ConnectionTrait, category_model: Model) -> Result<Model, Error> {
    debug!("New FeedbackCategory Model to be inserted: {category_model:?}");

    let category_active_model = ActiveModel {
        name: Set(category_model.name),
        ..Default::default()
    };

    Ok(category_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().all(db).await?)
}
