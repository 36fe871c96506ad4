use super::error::{EntityApiErrorKind, Error};
use crate::mutate::{self, UpdateMap};
use chrono::Utc;
use entity::assignments::{ActiveModel, Column, Entity, Model};
use entity::{
    assignments_feedback_categories, class_enrollments, feedback_categories, submissions, users, Id,
};
use log::*;
use sea_orm::{
    entity::prelude::*, ConnectionTrait, DatabaseConnection, IntoActiveModel, QueryOrder, Set,
    TransactionTrait, Value,
};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Inserts a new assignment connected to its class and feedback categories.
/// Every category id must already exist; a dangling id fails the whole
/// operation with `RecordNotFound`.
pub async fn create(
    db: &DatabaseConnection,
    assignment_model: Model,
    feedback_category_ids: Vec<Id>,
) -> Result<Model, Error> {
    debug!("New Assignment Model to be inserted: {assignment_model:?}");

    let txn = db.begin().await?;

    let found_categories = feedback_categories::Entity::find()
        .filter(feedback_categories::Column::Id.is_in(feedback_category_ids.clone()))
        .all(&txn)
        .await?;
    if found_categories.len() != feedback_category_ids.len() {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        });
    }

    let now = Utc::now();
    let assignment = ActiveModel {
        class_id: Set(assignment_model.class_id),
        name: Set(assignment_model.name),
        description: Set(assignment_model.description),
        due_date: Set(assignment_model.due_date),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for category_id in feedback_category_ids {
        assignments_feedback_categories::ActiveModel {
            assignment_id: Set(assignment.id),
            feedback_category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(assignment)
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

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    mut update_map: UpdateMap,
) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    update_map.insert(
        "updated_at".to_string(),
        Some(Value::ChronoDateTimeWithTimeZone(Some(Box::new(
            Utc::now().into(),
        )))),
    );

    mutate::update::<ActiveModel, Column>(db, existing.into_active_model(), update_map).await
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    existing.clone().delete(db).await?;
    Ok(existing)
}

/// One roster row per student enrolled in the assignment's class. All
/// submission-dependent fields refer to the student's staged submission and
/// are None/false when the student never staged anything.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[schema(as = entity_api::assignment::SubmissionStatus)]
pub struct SubmissionStatus {
    pub academic_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Id of the staged submission, or None if the student never staged
    pub submission_id: Option<Id>,
    pub is_graded: bool,
    pub play_count: Option<i32>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub submission_date_time: Option<DateTimeWithTimeZone>,
}

/// Builds the professor's roster view for an assignment.
///
/// The query starts from the enrollment relation rather than the submission
/// table, so every enrolled student is represented even with zero
/// submissions. Per student the most recent draft (`staged = false`) is
/// selected and its staged counterpart, if any, supplies the visible fields.
pub async fn submission_status(
    db: &DatabaseConnection,
    assignment_id: Id,
) -> Result<Vec<SubmissionStatus>, Error> {
    let assignment = find_by_id(db, assignment_id).await?;

    let enrolled = class_enrollments::Entity::find()
        .filter(class_enrollments::Column::ClassId.eq(assignment.class_id))
        .find_also_related(users::Entity)
        .all(db)
        .await?;

    let students: Vec<users::Model> = enrolled
        .into_iter()
        .filter_map(|(_, student)| student)
        .collect();
    let student_ids: Vec<Id> = students.iter().map(|s| s.id).collect();

    // Most recent draft per student for this assignment.
    let drafts = submissions::Entity::find()
        .filter(submissions::Column::AssignmentId.eq(assignment_id))
        .filter(submissions::Column::Staged.eq(false))
        .filter(submissions::Column::StudentId.is_in(student_ids))
        .order_by_desc(submissions::Column::UpdatedAt)
        .all(db)
        .await?;

    let mut draft_by_student: HashMap<Id, &submissions::Model> = HashMap::new();
    for draft in &drafts {
        draft_by_student.entry(draft.student_id).or_insert(draft);
    }

    let staged_ids: Vec<Id> = draft_by_student
        .values()
        .filter_map(|d| d.staged_submission_id)
        .collect();
    let staged_rows = if staged_ids.is_empty() {
        Vec::new()
    } else {
        submissions::Entity::find()
            .filter(submissions::Column::Id.is_in(staged_ids))
            .all(db)
            .await?
    };
    let staged_by_id: HashMap<Id, &submissions::Model> =
        staged_rows.iter().map(|s| (s.id, s)).collect();

    Ok(students
        .into_iter()
        .map(|student| {
            let staged = draft_by_student
                .get(&student.id)
                .and_then(|draft| draft.staged_submission_id)
                .and_then(|staged_id| staged_by_id.get(&staged_id).copied());

            SubmissionStatus {
                academic_id: student.academic_id,
                first_name: student.first_name,
                last_name: student.last_name,
                submission_id: staged.map(|s| s.id),
                is_graded: staged.map(|s| s.graded).unwrap_or(false),
                play_count: staged.map(|s| s.play_count),
                submission_date_time: staged.map(|s| s.updated_at),
            }
        })
        .collect())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use entity::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn student(id: Id, academic_id: &str) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id,
            academic_id: academic_id.to_owned(),
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            email: format!("{academic_id}@courseflow.dev"),
            password: "hash".to_owned(),
            role: Role::Student,
            department_id: 1,
            token_version: 0,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn enrollment(id: Id, student_id: Id) -> class_enrollments::Model {
        class_enrollments::Model {
            id,
            student_id,
            class_id: 10,
            created_at: chrono::Utc::now().into(),
        }
    }

    fn submission(id: Id, student_id: Id, staged: bool, link: Option<Id>) -> submissions::Model {
        let now = chrono::Utc::now();
        submissions::Model {
            id,
            student_id,
            assignment_id: 3,
            staged,
            text_file: None,
            audio_file: None,
            sequential_regions: None,
            play_count: 2,
            playback_rate: 1.0,
            graded: staged,
            staged_submission_id: link,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn assignment() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 3,
            class_id: 10,
            name: "Consecutive interpretation 1".to_owned(),
            description: None,
            due_date: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn submission_status_includes_students_without_submissions() -> Result<(), Error> {
        let with_submission = student(1, "S1001");
        let without_submission = student(2, "S1002");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![assignment()]])
            .append_query_results(vec![vec![
                (enrollment(1, 1), Some(with_submission)),
                (enrollment(2, 2), Some(without_submission)),
            ]])
            .append_query_results(vec![vec![submission(100, 1, false, Some(101))]]) // drafts
            .append_query_results(vec![vec![submission(101, 1, true, None)]]) // staged rows
            .into_connection();

        let rows = submission_status(&db, 3).await?;

        assert_eq!(rows.len(), 2);

        let submitted = rows.iter().find(|r| r.academic_id == "S1001").unwrap();
        assert_eq!(submitted.submission_id, Some(101));
        assert!(submitted.is_graded);
        assert_eq!(submitted.play_count, Some(2));
        assert!(submitted.submission_date_time.is_some());

        let missing = rows.iter().find(|r| r.academic_id == "S1002").unwrap();
        assert_eq!(missing.submission_id, None);
        assert!(!missing.is_graded);
        assert_eq!(missing.play_count, None);
        assert_eq!(missing.submission_date_time, None);

        Ok(())
    }

    #[tokio::test]
    async fn submission_status_ignores_unstaged_drafts() -> Result<(), Error> {
        let enrolled_student = student(1, "S1001");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![assignment()]])
            .append_query_results(vec![vec![(enrollment(1, 1), Some(enrolled_student))]])
            .append_query_results(vec![vec![submission(100, 1, false, None)]]) // draft, never staged
            .into_connection();

        let rows = submission_status(&db, 3).await?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].submission_id, None);
        assert!(!rows[0].is_graded);

        Ok(())
    }
}
