use chrono::{DateTime, FixedOffset};
use domain::Id;
use domain::{IntoUpdateMap, UpdateMap};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /assignments`: the assignment fields plus the feedback
/// category ids to connect.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::assignment::CreateParams)]
pub(crate) struct CreateParams {
    pub(crate) class_id: Id,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub(crate) due_date: Option<DateTime<FixedOffset>>,
    pub(crate) feedback_category_ids: Vec<Id>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::assignment::UpdateParams)]
pub(crate) struct UpdateParams {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub(crate) due_date: Option<DateTime<FixedOffset>>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert("name".to_string(), Some(Value::String(Some(Box::new(name)))));
        }
        if let Some(description) = self.description {
            update_map.insert(
                "description".to_string(),
                Some(Value::String(Some(Box::new(description)))),
            );
        }
        if let Some(due_date) = self.due_date {
            update_map.insert(
                "due_date".to_string(),
                Some(Value::ChronoDateTimeWithTimeZone(Some(Box::new(due_date)))),
            );
        }

        update_map
    }
}
