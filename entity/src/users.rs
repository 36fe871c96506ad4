use crate::roles::Role;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::users::Model)]
#[sea_orm(schema_name = "courseflow", table_name = "users")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// Student or staff number, the login identifier
    #[sea_orm(unique)]
    pub academic_id: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Password hash, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,

    pub role: Role,

    pub department_id: Id,

    /// Monotonic counter embedded in refresh tokens. Bumping it invalidates
    /// every refresh token issued before the bump.
    #[serde(skip_deserializing)]
    pub token_version: i32,

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
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Departments,

    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,

    #[sea_orm(has_many = "super::class_enrollments::Entity")]
    ClassEnrollments,

    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departments.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::class_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassEnrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
