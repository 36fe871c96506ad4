use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, Value};
use std::collections::HashMap;

pub use entity::{
    assignments, class_enrollments, classes, departments, feedback, feedback_categories, roles,
    submissions, users, Id,
};

pub mod assignment;
pub mod class;
pub mod error;
pub mod feedback_category;
pub mod feedback_entry;
pub mod mutate;
pub mod query;
pub mod submission;
pub mod user;

/// Filter criteria carried from the request layer into [`query::find_by`]:
/// column names mapped to optional SeaORM `Value`s. Keys come from typed
/// request params, so handlers never forward raw query strings.
///
/// ```
/// use sea_orm::Value;
/// use entity_api::QueryFilterMap;
///
/// let mut filters = QueryFilterMap::new();
/// filters.insert("assignment_id".to_string(), Some(Value::Int(Some(42))));
/// assert!(filters.get("assignment_id").is_some());
/// ```
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // Flatten the entry's inner Option so absent and None read the same
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Conversion from a typed params struct into a [`QueryFilterMap`].
/// Implemented by the request-layer index params for each filterable
/// resource.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

/// Seeds a freshly migrated database with a department, a professor, a class
/// and a couple of students so that a local instance is immediately usable.
pub async fn seed_database(db: &DatabaseConnection) {
    let now = chrono::Utc::now();

    let department = departments::ActiveModel {
        name: Set("Computer Science".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let professor = users::ActiveModel {
        academic_id: Set("P0001".to_owned()),
        first_name: Set("Ada".to_owned()),
        last_name: Set("Park".to_owned()),
        email: Set("ada.park@courseflow.dev".to_owned()),
        password: Set(generate_hash("password")),
        role: Set(roles::Role::Professor),
        department_id: Set(department.id),
        token_version: Set(0),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let class = classes::ActiveModel {
        name: Set("Intro to Interpretation".to_owned()),
        professor_id: Set(professor.id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    for (academic_id, first_name, last_name) in [
        ("S1001", "Noah", "Kim"),
        ("S1002", "Mia", "Lee"),
    ] {
        let student = users::ActiveModel {
            academic_id: Set(academic_id.to_owned()),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            email: Set(format!(
                "{}.{}@courseflow.dev",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            )),
            password: Set(generate_hash("password")),
            role: Set(roles::Role::Student),
            department_id: Set(department.id),
            token_version: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        class_enrollments::ActiveModel {
            student_id: Set(student.id),
            class_id: Set(class.id),
            created_at: Set(now.into()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }
}
