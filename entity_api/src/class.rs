use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::classes::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, Set};

pub async fn create(db: &impl ConnectionTrait, class_model: Model) -> Result<Model, Error> {
    debug!("New Class Model to be inserted: {class_model:?}");

    let now = Utc::now();
    let class_active_model = ActiveModel {
        name: Set(class_model.name),
        professor_id: Set(class_model.professor_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(class_active_model.insert(db).await?)
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
