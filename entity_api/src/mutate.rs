use crate::error::Error;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, Value,
};
use std::collections::HashMap;

/// Updates an existing record using a map of column names to values.
///
/// Only the columns present in the map are touched; everything else on the
/// active model is left unchanged. A column can be set to SQL NULL by
/// inserting a null-carrying `Value` (e.g. `Value::Json(None)`), which is how
/// the explicit "clear regions" patch reaches the database.
pub async fn update<A, C>(
    db: &impl ConnectionTrait,
    mut active_model: A,
    update_map: UpdateMap,
) -> Result<<A::Entity as EntityTrait>::Model, Error>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    C: ColumnTrait,
    A::Entity: EntityTrait<Column = C>,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    for column in C::iter() {
        if let Some(value) = update_map.get(&column.to_string()) {
            active_model.set(column, value.clone());
        }
    }
    Ok(active_model.update(db).await?)
}

/// A map of column names to their new values for a partial update.
///
/// A key that is absent means "leave the stored value alone"; a key that is
/// present always produces a SET clause. Callers build it from typed request
/// params through [`IntoUpdateMap`].
#[derive(Default)]
pub struct UpdateMap {
    map: HashMap<String, Option<Value>>,
}

impl UpdateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key).and_then(|opt| opt.as_ref())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

/// A trait that allows types to be converted into an UpdateMap.
pub trait IntoUpdateMap {
    fn into_update_map(self) -> UpdateMap;
}
