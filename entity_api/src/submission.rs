use super::error::{EntityApiErrorKind, Error};
use crate::mutate::{self, UpdateMap};
use chrono::Utc;
use entity::submissions::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, ConnectionTrait, DatabaseConnection, IntoActiveModel, Iterable, Set,
    TransactionTrait, Unchanged, Value,
};

/// Inserts a new draft submission for a (student, assignment) pair.
pub async fn create(db: &impl ConnectionTrait, submission_model: Model) -> Result<Model, Error> {
    debug!("New Submission Model to be inserted: {submission_model:?}");

    let now = Utc::now();
    let submission_active_model = ActiveModel {
        student_id: Set(submission_model.student_id),
        assignment_id: Set(submission_model.assignment_id),
        staged: Set(submission_model.staged),
        text_file: Set(submission_model.text_file),
        audio_file: Set(submission_model.audio_file),
        sequential_regions: Set(submission_model.sequential_regions),
        play_count: Set(submission_model.play_count),
        playback_rate: Set(submission_model.playback_rate),
        graded: Set(false),
        staged_submission_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(submission_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Applies a partial patch to a single submission. Only the columns present
/// in the map produce SET clauses; `sequential_regions` can be cleared by
/// mapping it to a null JSON value.
pub async fn update(db: &impl ConnectionTrait, id: Id, mut update_map: UpdateMap) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    update_map.insert(
        "updated_at".to_string(),
        Some(Value::ChronoDateTimeWithTimeZone(Some(Box::new(
            Utc::now().into(),
        )))),
    );

    mutate::update::<ActiveModel, Column>(db, existing.into_active_model(), update_map).await
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    existing.clone().delete(db).await?;
    Ok(existing)
}

/// Promotes a draft to its staged counterpart.
///
/// When the draft already links a staged record, only the content fields
/// {text_file, audio_file, sequential_regions, play_count, playback_rate} are
/// overwritten on that record; its id, `graded` flag and any feedback rows
/// anchored to it survive, so re-staging keeps existing feedback anchors
/// valid. Otherwise a new staged record is created and the draft is linked to
/// it within the same transaction.
///
/// Concurrent calls for the same draft race read-then-branch; the last write
/// wins. There is no unique constraint backing the one-staged-per-draft
/// invariant.
pub async fn stage(db: &DatabaseConnection, draft_id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    let draft = Entity::find_by_id(draft_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })?;

    let now = Utc::now();

    let staged = match draft.staged_submission_id {
        Some(staged_id) => {
            debug!("Re-staging draft {draft_id} onto existing staged submission {staged_id}");

            let existing = Entity::find_by_id(staged_id)
                .one(&txn)
                .await?
                .ok_or_else(|| Error {
                    source: None,
                    error_kind: EntityApiErrorKind::RecordNotFound,
                })?;

            let active_model = ActiveModel {
                id: Unchanged(existing.id),
                text_file: Set(draft.text_file),
                audio_file: Set(draft.audio_file),
                sequential_regions: Set(draft.sequential_regions),
                play_count: Set(draft.play_count),
                playback_rate: Set(draft.playback_rate),
                updated_at: Set(now.into()),
                ..Default::default()
            };

            active_model.update(&txn).await?
        }
        None => {
            debug!("Staging draft {draft_id} into a new staged submission");

            let created = ActiveModel {
                student_id: Set(draft.student_id),
                assignment_id: Set(draft.assignment_id),
                staged: Set(true),
                text_file: Set(draft.text_file),
                audio_file: Set(draft.audio_file),
                sequential_regions: Set(draft.sequential_regions),
                play_count: Set(draft.play_count),
                playback_rate: Set(draft.playback_rate),
                graded: Set(false),
                staged_submission_id: Set(None),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            // Link the draft to its new staged counterpart.
            let draft_link = ActiveModel {
                id: Unchanged(draft.id),
                staged_submission_id: Set(Some(created.id)),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            draft_link.update(&txn).await?;

            created
        }
    };

    txn.commit().await?;

    Ok(staged)
}

/// Applies the same partial patch to every id in `ids`, returning the number
/// of rows updated.
///
/// With `atomic = false` (the default) missing ids are skipped and the count
/// reflects only the rows that were actually updated. With `atomic = true`
/// the whole batch runs in one transaction and any missing id fails it.
pub async fn update_many(
    db: &DatabaseConnection,
    ids: Vec<Id>,
    update_map: UpdateMap,
    atomic: bool,
) -> Result<u64, Error> {
    let now_value = Value::ChronoDateTimeWithTimeZone(Some(Box::new(Utc::now().into())));

    if atomic {
        let txn = db.begin().await?;
        let mut count = 0u64;
        for id in ids {
            let existing = Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| Error {
                    source: None,
                    error_kind: EntityApiErrorKind::RecordNotFound,
                })?;

            let mut map = clone_update_map(&update_map);
            map.insert("updated_at".to_string(), Some(now_value.clone()));
            mutate::update::<ActiveModel, Column>(&txn, existing.into_active_model(), map).await?;
            count += 1;
        }
        txn.commit().await?;
        Ok(count)
    } else {
        let mut count = 0u64;
        for id in ids {
            let existing = match Entity::find_by_id(id).one(db).await? {
                Some(model) => model,
                None => {
                    debug!("Batch update skipping missing submission id {id}");
                    continue;
                }
            };

            let mut map = clone_update_map(&update_map);
            map.insert("updated_at".to_string(), Some(now_value.clone()));
            mutate::update::<ActiveModel, Column>(db, existing.into_active_model(), map).await?;
            count += 1;
        }
        Ok(count)
    }
}

// UpdateMap holds owned sea_orm Values and is consumed by mutate::update, so
// the batch path re-materializes it per id from the patchable columns.
fn clone_update_map(source: &UpdateMap) -> UpdateMap {
    let mut map = UpdateMap::new();
    for column in Column::iter() {
        let name = column.to_string();
        if let Some(value) = source.get(&name) {
            map.insert(name, Some(value.clone()));
        }
    }
    map
}

/// Returns the stored audio blob for a submission, if any.
pub async fn find_audio(db: &impl ConnectionTrait, id: Id) -> Result<Vec<u8>, Error> {
    let submission = find_by_id(db, id).await?;

    submission.audio_file.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Replaces the stored audio blob. The payload arrives fully buffered.
pub async fn store_audio(db: &impl ConnectionTrait, id: Id, bytes: Vec<u8>) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        audio_file: Set(Some(bytes)),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.update(db).await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    fn draft(id: Id, staged_submission_id: Option<Id>) -> Model {
        let now = chrono::Utc::now();
        Model {
            id,
            student_id: 7,
            assignment_id: 3,
            staged: false,
            text_file: Some("draft text".to_owned()),
            audio_file: Some(vec![1, 2, 3]),
            sequential_regions: Some(serde_json::json!([{"start": 0.0, "end": 2.5}])),
            play_count: 4,
            playback_rate: 1.25,
            graded: false,
            staged_submission_id,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn staged_from(draft: &Model, id: Id) -> Model {
        Model {
            id,
            staged: true,
            graded: false,
            staged_submission_id: None,
            ..draft.clone()
        }
    }

    #[tokio::test]
    async fn stage_creates_a_new_staged_record_and_links_the_draft() -> Result<(), Error> {
        let draft_model = draft(42, None);
        let staged_model = staged_from(&draft_model, 43);
        let mut linked_draft = draft_model.clone();
        linked_draft.staged_submission_id = Some(43);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![draft_model.clone()],  // load draft
                vec![staged_model.clone()], // insert staged record
                vec![linked_draft],         // link draft to staged record
            ])
            .into_connection();

        let staged = stage(&db, 42).await?;

        assert_eq!(staged.id, 43);
        assert!(staged.staged);
        assert_eq!(staged.text_file, draft_model.text_file);
        assert_eq!(staged.staged_submission_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn stage_overwrites_the_existing_staged_record_in_place() -> Result<(), Error> {
        let draft_model = draft(42, Some(43));
        // Previously staged snapshot with stale content but already graded.
        let mut existing_staged = staged_from(&draft_model, 43);
        existing_staged.text_file = Some("old text".to_owned());
        existing_staged.graded = true;

        let mut updated_staged = staged_from(&draft_model, 43);
        updated_staged.graded = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![draft_model.clone()],    // load draft
                vec![existing_staged],        // load staged counterpart
                vec![updated_staged.clone()], // update in place
            ])
            .into_connection();

        let staged = stage(&db, 42).await?;

        // Same identity, refreshed content, grading state untouched.
        assert_eq!(staged.id, 43);
        assert_eq!(staged.text_file, Some("draft text".to_owned()));
        assert!(staged.graded);

        Ok(())
    }

    #[tokio::test]
    async fn stage_returns_not_found_for_a_missing_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(Vec::<Vec<Model>>::from([vec![]]))
            .into_connection();

        let result = stage(&db, 999).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn stage_runs_inside_a_transaction() -> Result<(), Error> {
        let draft_model = draft(42, None);
        let staged_model = staged_from(&draft_model, 43);
        let mut linked_draft = draft_model.clone();
        linked_draft.staged_submission_id = Some(43);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![draft_model],
                vec![staged_model],
                vec![linked_draft],
            ])
            .into_connection();

        stage(&db, 42).await?;

        let log = db.into_transaction_log();
        assert!(matches!(log.first(), Some(Transaction { .. })));

        Ok(())
    }

    // A patch that omits sequential_regions must not touch the stored value:
    // the UPDATE's SET clause may only name the patched columns and
    // updated_at. The RETURNING tail lists every column, so only the part
    // before it is inspected.
    #[tokio::test]
    async fn update_leaves_sequential_regions_alone_when_omitted() -> Result<(), Error> {
        let existing = draft(7, None);
        let mut updated = existing.clone();
        updated.play_count = 9;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![existing], vec![updated]])
            .into_connection();

        let mut update_map = UpdateMap::new();
        update_map.insert("play_count".to_string(), Some(Value::Int(Some(9))));

        update(&db, 7, update_map).await?;

        let log = db.into_transaction_log();
        let statement = format!("{:?}", log.last());
        let set_clause = statement
            .split("RETURNING")
            .next()
            .unwrap_or(&statement)
            .to_owned();

        assert!(set_clause.contains("UPDATE"));
        assert!(set_clause.contains("play_count"));
        assert!(!set_clause.contains("sequential_regions"));

        Ok(())
    }

    #[tokio::test]
    async fn update_many_best_effort_skips_missing_ids() -> Result<(), Error> {
        let first = draft(1, None);
        let second = draft(2, None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![first.clone()],  // find id 1
                vec![first],          // update id 1
                vec![second.clone()], // find id 2
                vec![second],         // update id 2
            ])
            .append_query_results(Vec::<Vec<Model>>::from([vec![]])) // find id 999 -> absent
            .into_connection();

        let mut update_map = UpdateMap::new();
        update_map.insert(
            "play_count".to_string(),
            Some(Value::Int(Some(9))),
        );

        let count = update_many(&db, vec![1, 2, 999], update_map, false).await?;

        assert_eq!(count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_many_atomic_fails_on_a_missing_id() {
        let first = draft(1, None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![first.clone()], // find id 1
                vec![first],         // update id 1
            ])
            .append_query_results(Vec::<Vec<Model>>::from([vec![]])) // find id 999 -> absent
            .into_connection();

        let mut update_map = UpdateMap::new();
        update_map.insert("play_count".to_string(), Some(Value::Int(Some(9))));

        let result = update_many(&db, vec![1, 999], update_map, true).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_audio_returns_not_found_when_blob_is_absent() {
        let mut submission = draft(5, None);
        submission.audio_file = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![submission]])
            .into_connection();

        let result = find_audio(&db, 5).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }
}
