use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A professor's comment anchored to a half-open character range
/// `[start, end)` within a staged submission's content.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::feedback::Model)]
#[sea_orm(schema_name = "courseflow", table_name = "feedback")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// The staged submission this feedback is anchored to
    pub submission_id: Id,

    pub professor_id: Id,

    pub start: i32,

    pub end: i32,

    /// Whether the selection covers the source text rather than the transcript
    pub selected_source_text: bool,

    pub comment: Option<String>,

    /// Mirrors submission staging; feedback may itself be draft or final
    #[serde(default)]
    pub staged: bool,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Submissions,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProfessorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,

    #[sea_orm(has_many = "super::feedback_feedback_categories::Entity")]
    FeedbackFeedbackCategories,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::feedback_categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::feedback_feedback_categories::Relation::FeedbackCategories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::feedback_feedback_categories::Relation::Feedback
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
