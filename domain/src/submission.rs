//! Submission lifecycle: draft CRUD, the draft-to-staged transition, audio
//! blob access, and the batch patch.

use crate::error::Error;
use crate::submissions::Model;
use crate::Id;
use entity_api::mutate::IntoUpdateMap;
use entity_api::{submission, IntoQueryFilterMap};
use entity_api::{query, submissions};
use sea_orm::DatabaseConnection;
use service::config::Config;

pub use entity_api::submission::{create, find_by_id};

pub async fn find_by(
    db: &DatabaseConnection,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let results = query::find_by::<submissions::Entity, submissions::Column>(
        db,
        params.into_query_filter_map(),
    )
    .await?;

    Ok(results)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl IntoUpdateMap,
) -> Result<Model, Error> {
    Ok(submission::update(db, id, params.into_update_map()).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(submission::delete_by_id(db, id).await?)
}

/// Promotes a draft to its staged counterpart; create-or-update, idempotent
/// per draft. See `entity_api::submission::stage` for the transition itself.
pub async fn stage(db: &DatabaseConnection, draft_id: Id) -> Result<Model, Error> {
    Ok(submission::stage(db, draft_id).await?)
}

/// Applies one partial patch to many submissions, returning the number of
/// rows updated. Atomicity follows the `batch_atomic` config flag.
pub async fn update_many(
    db: &DatabaseConnection,
    config: &Config,
    ids: Vec<Id>,
    params: impl IntoUpdateMap,
) -> Result<u64, Error> {
    Ok(submission::update_many(db, ids, params.into_update_map(), config.batch_atomic).await?)
}

pub async fn find_audio(db: &DatabaseConnection, id: Id) -> Result<Vec<u8>, Error> {
    Ok(submission::find_audio(db, id).await?)
}

pub async fn store_audio(db: &DatabaseConnection, id: Id, bytes: Vec<u8>) -> Result<Model, Error> {
    Ok(submission::store_audio(db, id, bytes).await?)
}
