use domain::Id;
use domain::{IntoQueryFilterMap, QueryFilterMap};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /feedback`. The `[start, end)` selection is a half-open
/// character offset range inside the staged submission's content; overlapping
/// ranges are allowed.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::feedback::CreateParams)]
pub(crate) struct CreateParams {
    pub(crate) submission_id: Id,
    pub(crate) start: i32,
    pub(crate) end: i32,
    pub(crate) selected_source_text: bool,
    pub(crate) comment: Option<String>,
    #[serde(default)]
    pub(crate) staged: bool,
    pub(crate) category_ids: Vec<Id>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    pub(crate) submission_id: Option<Id>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(submission_id) = self.submission_id {
            query_filter_map.insert(
                "submission_id".to_string(),
                Some(Value::Int(Some(submission_id))),
            );
        }

        query_filter_map
    }
}
