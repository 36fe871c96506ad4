use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::feedback::{ActiveModel, Column, Entity, Model};
use entity::{feedback_categories, feedback_feedback_categories, Id};
use log::*;
use sea_orm::{
    entity::prelude::*, ConnectionTrait, DatabaseConnection, Set, TransactionTrait,
};

/// Persists a feedback annotation and connects its categories by id.
/// Dangling category ids fail the whole operation with `RecordNotFound`.
/// Overlapping or duplicate `[start, end)` ranges are allowed; professors may
/// leave several independent comments touching the same span.
pub async fn create(
    db: &DatabaseConnection,
    feedback_model: Model,
    category_ids: Vec<Id>,
) -> Result<Model, Error> {
    debug!("New Feedback Model to be inserted: {feedback_model:?}");

    let txn = db.begin().await?;

    let found_categories = feedback_categories::Entity::find()
        .filter(feedback_categories::Column::Id.is_in(category_ids.clone()))
        .all(&txn)
        .await?;
    if found_categories.len() != category_ids.len() {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        });
    }

    let now = Utc::now();
    let feedback = ActiveModel {
        submission_id: Set(feedback_model.submission_id),
        professor_id: Set(feedback_model.professor_id),
        start: Set(feedback_model.start),
        end: Set(feedback_model.end),
        selected_source_text: Set(feedback_model.selected_source_text),
        comment: Set(feedback_model.comment),
        staged: Set(feedback_model.staged),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for category_id in category_ids {
        feedback_feedback_categories::ActiveModel {
            feedback_id: Set(feedback.id),
            feedback_category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(feedback)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_submission(
    db: &DatabaseConnection,
    submission_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::SubmissionId.eq(submission_id))
        .all(db)
        .await?)
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().all(db).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    existing.clone().delete(db).await?;
    Ok(existing)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn feedback_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 1,
            submission_id: 43,
            professor_id: 9,
            start: 10,
            end: 25,
            selected_source_text: true,
            comment: Some("Watch the register here".to_owned()),
            staged: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_fails_when_a_category_id_is_dangling() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![feedback_categories::Model {
                id: 1,
                name: "Grammar".to_owned(),
            }]])
            .into_connection();

        // Two ids requested, only one exists.
        let result = create(&db, feedback_model(), vec![1, 2]).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn create_connects_existing_categories() -> Result<(), Error> {
        let categories = vec![
            feedback_categories::Model {
                id: 1,
                name: "Grammar".to_owned(),
            },
            feedback_categories::Model {
                id: 2,
                name: "Fluency".to_owned(),
            },
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![categories])
            .append_query_results(vec![vec![feedback_model()]])
            .append_query_results(vec![
                vec![feedback_feedback_categories::Model {
                    id: 1,
                    feedback_id: 1,
                    feedback_category_id: 1,
                }],
                vec![feedback_feedback_categories::Model {
                    id: 2,
                    feedback_id: 1,
                    feedback_category_id: 2,
                }],
            ])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection();

        let feedback = create(&db, feedback_model(), vec![1, 2]).await?;

        assert_eq!(feedback.submission_id, 43);
        assert_eq!((feedback.start, feedback.end), (10, 25));

        Ok(())
    }
}
