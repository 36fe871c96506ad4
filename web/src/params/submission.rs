use crate::params::patch::Patch;
use domain::Id;
use domain::{IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, UpdateMap};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    pub(crate) student_id: Option<Id>,
    pub(crate) assignment_id: Option<Id>,
    pub(crate) staged: Option<bool>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(student_id) = self.student_id {
            query_filter_map.insert(
                "student_id".to_string(),
                Some(Value::Int(Some(student_id))),
            );
        }
        if let Some(assignment_id) = self.assignment_id {
            query_filter_map.insert(
                "assignment_id".to_string(),
                Some(Value::Int(Some(assignment_id))),
            );
        }
        if let Some(staged) = self.staged {
            query_filter_map.insert("staged".to_string(), Some(Value::Bool(Some(staged))));
        }

        query_filter_map
    }
}

/// Partial patch for a submission. Every field is optional; only the fields
/// present in the body produce SET clauses. `sequential_regions` is a
/// three-way patch so an explicit null clears stored regions while an
/// omitted field leaves them alone.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::submission::UpdateParams)]
pub(crate) struct UpdateParams {
    pub(crate) text_file: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub(crate) sequential_regions: Patch<serde_json::Value>,
    pub(crate) play_count: Option<i32>,
    pub(crate) playback_rate: Option<f64>,
    pub(crate) graded: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(text_file) = self.text_file {
            update_map.insert(
                "text_file".to_string(),
                Some(Value::String(Some(Box::new(text_file)))),
            );
        }
        match self.sequential_regions {
            Patch::Unset => (),
            Patch::Clear => {
                update_map.insert("sequential_regions".to_string(), Some(Value::Json(None)));
            }
            Patch::Set(regions) => {
                update_map.insert(
                    "sequential_regions".to_string(),
                    Some(Value::Json(Some(Box::new(regions)))),
                );
            }
        }
        if let Some(play_count) = self.play_count {
            update_map.insert("play_count".to_string(), Some(Value::Int(Some(play_count))));
        }
        if let Some(playback_rate) = self.playback_rate {
            update_map.insert(
                "playback_rate".to_string(),
                Some(Value::Double(Some(playback_rate))),
            );
        }
        if let Some(graded) = self.graded {
            update_map.insert("graded".to_string(), Some(Value::Bool(Some(graded))));
        }

        update_map
    }
}

/// Body of `PATCH /submissions/batch`: one patch applied to many ids.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::submission::BatchUpdateParams)]
pub(crate) struct BatchUpdateParams {
    pub(crate) ids: Vec<Id>,
    pub(crate) dto: UpdateParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_regions_produce_no_set_clause() {
        let params: UpdateParams = serde_json::from_str(r#"{"play_count": 3}"#).unwrap();
        let update_map = params.into_update_map();

        assert!(update_map.get("sequential_regions").is_none());
        assert!(update_map.get("play_count").is_some());
    }

    #[test]
    fn explicit_null_regions_clear_to_sql_null() {
        let params: UpdateParams =
            serde_json::from_str(r#"{"sequential_regions": null}"#).unwrap();
        let update_map = params.into_update_map();

        // Key must be present but carry a null JSON value.
        assert_eq!(
            update_map.get("sequential_regions"),
            Some(&Value::Json(None))
        );
    }

    #[test]
    fn concrete_regions_are_carried_through() {
        let params: UpdateParams =
            serde_json::from_str(r#"{"sequential_regions": [{"start": 1.5, "end": 4.0}]}"#)
                .unwrap();
        let update_map = params.into_update_map();

        assert_eq!(
            update_map.get("sequential_regions"),
            Some(&Value::Json(Some(Box::new(
                serde_json::json!([{"start": 1.5, "end": 4.0}])
            ))))
        );
    }
}
