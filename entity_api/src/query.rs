use crate::{error::Error, QueryFilterMap};
use sea_orm::strum::IntoEnumIterator;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Lists an entity's records, adding one equality predicate per filter entry
/// whose key names a real column. Entries that match no column are ignored,
/// so callers can pass request params through without sanitizing them first.
pub async fn find_by<E, C>(
    db: &DatabaseConnection,
    filters: QueryFilterMap,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait,
    C: ColumnTrait + IntoEnumIterator,
{
    let query = C::iter().fold(E::find(), |query, column| {
        match filters.get(&column.to_string()) {
            Some(value) => query.filter(column.eq(value)),
            None => query,
        }
    });

    Ok(query.all(db).await?)
}
