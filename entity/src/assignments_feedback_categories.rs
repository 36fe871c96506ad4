use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "courseflow", table_name = "assignments_feedback_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,

    pub assignment_id: Id,

    pub feedback_category_id: Id,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Assignments,

    #[sea_orm(
        belongs_to = "super::feedback_categories::Entity",
        from = "Column::FeedbackCategoryId",
        to = "super::feedback_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FeedbackCategories,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::feedback_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
