use chrono::Utc;
use password_auth::generate_hash;
use sea_orm::{DbBackend, Statement, Value};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        insert_initial_admin_user(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        delete_initial_admin_user(manager).await
    }
}

// NOTE: We use raw SQL here to avoid issues with entity type changes in future migrations.
// Using the ORM can break if new fields are added later, but raw SQL remains compatible.
async fn insert_initial_admin_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let now = Utc::now();

    let password_hash = generate_hash("password");

    let department_sql = r#"
        INSERT INTO courseflow.departments (name) VALUES ($1)
        RETURNING id
    "#;
    let department_row = db
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            department_sql,
            vec![Value::String(Some(Box::new("Administration".to_owned())))],
        ))
        .await?
        .ok_or_else(|| DbErr::Custom("department insert returned no row".to_owned()))?;
    let department_id: i32 = department_row
        .try_get("", "id")
        .map_err(|e| DbErr::Custom(format!("failed to read department id: {e}")))?;

    let user_sql = r#"
        INSERT INTO courseflow.users (
            academic_id, first_name, last_name, email, password, role,
            department_id, token_version, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, 'admin', $6, 0, $7, $8)
    "#;
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        user_sql,
        vec![
            Value::String(Some(Box::new("A0001".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new("admin@courseflow.dev".to_owned()))),
            Value::String(Some(Box::new(password_hash))),
            Value::Int(Some(department_id)),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
        ],
    ))
    .await?;

    Ok(())
}

async fn delete_initial_admin_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();

    db.execute_unprepared("DELETE FROM courseflow.users WHERE academic_id = 'A0001'")
        .await?;
    db.execute_unprepared("DELETE FROM courseflow.departments WHERE name = 'Administration'")
        .await?;

    Ok(())
}
