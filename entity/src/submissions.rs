use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student's work for an assignment.
///
/// A row is either a draft (`staged = false`), freely editable by the student,
/// or a staged snapshot (`staged = true`), the only kind visible to grading and
/// feedback. The draft points at its staged counterpart through
/// `staged_submission_id`; a draft has at most one staged counterpart.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::submissions::Model)]
#[sea_orm(schema_name = "courseflow", table_name = "submissions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    pub student_id: Id,

    pub assignment_id: Id,

    #[serde(default)]
    pub staged: bool,

    pub text_file: Option<String>,

    /// Raw audio blob, buffered fully in memory on upload. Skipped in JSON
    /// responses; served through the dedicated audio endpoint instead.
    #[serde(skip)]
    #[schema(ignore)]
    pub audio_file: Option<Vec<u8>>,

    /// Ordered list of `{start, end}` playback region markers. A NULL column
    /// is the explicit "no regions" state, distinct from an omitted field in
    /// a PATCH body.
    #[schema(value_type = Option<Object>)]
    pub sequential_regions: Option<Json>,

    #[serde(default)]
    pub play_count: i32,

    #[serde(default = "default_playback_rate")]
    pub playback_rate: f64,

    #[serde(default)]
    pub graded: bool,

    /// Set on a draft once it has been staged; None until then.
    pub staged_submission_id: Option<Id>,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

fn default_playback_rate() -> f64 {
    1.0
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,

    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Assignments,

    /// Self-reference from a draft to its staged counterpart.
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::StagedSubmissionId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    StagedSubmission,

    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
