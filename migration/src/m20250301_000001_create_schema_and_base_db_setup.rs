use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS courseflow;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO courseflow, public;")
            .await?;

        // Grant the base DB user that executes all platform queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE courseflow TO courseflow;
                    GRANT ALL ON SCHEMA courseflow TO courseflow;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA courseflow GRANT ALL ON TABLES TO courseflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA courseflow GRANT ALL ON SEQUENCES TO courseflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA courseflow GRANT ALL ON FUNCTIONS TO courseflow;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA courseflow REVOKE ALL ON FUNCTIONS FROM courseflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA courseflow REVOKE ALL ON SEQUENCES FROM courseflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA courseflow REVOKE ALL ON TABLES FROM courseflow;
                    REVOKE ALL ON SCHEMA courseflow FROM courseflow;
                    REVOKE ALL PRIVILEGES ON DATABASE courseflow FROM courseflow;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS courseflow CASCADE;")
            .await?;

        Ok(())
    }
}
