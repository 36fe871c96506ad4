use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "courseflow", table_name = "feedback_feedback_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,

    pub feedback_id: Id,

    pub feedback_category_id: Id,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::feedback::Entity",
        from = "Column::FeedbackId",
        to = "super::feedback::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Feedback,

    #[sea_orm(
        belongs_to = "super::feedback_categories::Entity",
        from = "Column::FeedbackCategoryId",
        to = "super::feedback_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FeedbackCategories,
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl Related<super::feedback_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
