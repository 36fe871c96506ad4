use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::assignments::Model)]
#[sea_orm(schema_name = "courseflow", table_name = "assignments")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// The class this assignment belongs to
    pub class_id: Id,

    pub name: String,

    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date: Option<DateTimeWithTimeZone>,

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
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Classes,

    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,

    #[sea_orm(has_many = "super::assignments_feedback_categories::Entity")]
    AssignmentsFeedbackCategories,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::feedback_categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::assignments_feedback_categories::Relation::FeedbackCategories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::assignments_feedback_categories::Relation::Assignments
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
