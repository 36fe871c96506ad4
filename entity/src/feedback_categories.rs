use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::feedback_categories::Model)]
#[sea_orm(schema_name = "courseflow", table_name = "feedback_categories")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignments_feedback_categories::Entity")]
    AssignmentsFeedbackCategories,

    #[sea_orm(has_many = "super::feedback_feedback_categories::Entity")]
    FeedbackFeedbackCategories,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        super::assignments_feedback_categories::Relation::Assignments.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::assignments_feedback_categories::Relation::FeedbackCategories
                .def()
                .rev(),
        )
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        super::feedback_feedback_categories::Relation::Feedback.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::feedback_feedback_categories::Relation::FeedbackCategories
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
