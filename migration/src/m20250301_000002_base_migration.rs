use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Academic role carried by every user
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE courseflow.role AS ENUM (
                    'student',
                    'professor',
                    'admin'
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE courseflow.role OWNER TO courseflow")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.departments (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.users (
                id SERIAL PRIMARY KEY,
                academic_id VARCHAR(50) NOT NULL UNIQUE,
                first_name VARCHAR(255) NOT NULL,
                last_name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                password VARCHAR(255) NOT NULL,
                role courseflow.role NOT NULL DEFAULT 'student',
                department_id INTEGER NOT NULL
                    REFERENCES courseflow.departments(id),
                token_version INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.classes (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                professor_id INTEGER NOT NULL
                    REFERENCES courseflow.users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.class_enrollments (
                id SERIAL PRIMARY KEY,
                student_id INTEGER NOT NULL
                    REFERENCES courseflow.users(id) ON DELETE CASCADE,
                class_id INTEGER NOT NULL
                    REFERENCES courseflow.classes(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CONSTRAINT class_enrollments_student_class_unique UNIQUE(student_id, class_id)
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.assignments (
                id SERIAL PRIMARY KEY,
                class_id INTEGER NOT NULL
                    REFERENCES courseflow.classes(id) ON DELETE CASCADE,
                name VARCHAR(255) NOT NULL,
                description TEXT,
                due_date TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.feedback_categories (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.assignments_feedback_categories (
                id SERIAL PRIMARY KEY,
                assignment_id INTEGER NOT NULL
                    REFERENCES courseflow.assignments(id) ON DELETE CASCADE,
                feedback_category_id INTEGER NOT NULL
                    REFERENCES courseflow.feedback_categories(id) ON DELETE CASCADE,

                CONSTRAINT assignments_feedback_categories_unique
                    UNIQUE(assignment_id, feedback_category_id)
            )
        "#,
            )
            .await?;

        // staged_submission_id points a draft at its staged snapshot;
        // deleting the snapshot detaches the draft instead of cascading.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.submissions (
                id SERIAL PRIMARY KEY,
                student_id INTEGER NOT NULL
                    REFERENCES courseflow.users(id) ON DELETE CASCADE,
                assignment_id INTEGER NOT NULL
                    REFERENCES courseflow.assignments(id) ON DELETE CASCADE,
                staged BOOLEAN NOT NULL DEFAULT FALSE,
                text_file TEXT,
                audio_file BYTEA,
                sequential_regions JSONB,
                play_count INTEGER NOT NULL DEFAULT 0,
                playback_rate DOUBLE PRECISION NOT NULL DEFAULT 1.0,
                graded BOOLEAN NOT NULL DEFAULT FALSE,
                staged_submission_id INTEGER
                    REFERENCES courseflow.submissions(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.feedback (
                id SERIAL PRIMARY KEY,
                submission_id INTEGER NOT NULL
                    REFERENCES courseflow.submissions(id) ON DELETE CASCADE,
                professor_id INTEGER NOT NULL
                    REFERENCES courseflow.users(id) ON DELETE CASCADE,
                start INTEGER NOT NULL,
                "end" INTEGER NOT NULL,
                selected_source_text BOOLEAN NOT NULL,
                comment TEXT,
                staged BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS courseflow.feedback_feedback_categories (
                id SERIAL PRIMARY KEY,
                feedback_id INTEGER NOT NULL
                    REFERENCES courseflow.feedback(id) ON DELETE CASCADE,
                feedback_category_id INTEGER NOT NULL
                    REFERENCES courseflow.feedback_categories(id) ON DELETE CASCADE,

                CONSTRAINT feedback_feedback_categories_unique
                    UNIQUE(feedback_id, feedback_category_id)
            )
        "#,
            )
            .await?;

        // Indexes for the hot lookups: a student's drafts, an assignment's
        // submissions, a class roster and a submission's feedback.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_submissions_student_assignment
                 ON courseflow.submissions(student_id, assignment_id)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_submissions_assignment_staged
                 ON courseflow.submissions(assignment_id, staged)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_class_enrollments_class
                 ON courseflow.class_enrollments(class_id)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_feedback_submission
                 ON courseflow.feedback(submission_id)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            "feedback_feedback_categories",
            "feedback",
            "submissions",
            "assignments_feedback_categories",
            "feedback_categories",
            "assignments",
            "class_enrollments",
            "classes",
            "users",
            "departments",
        ] {
            manager
                .get_connection()
                .execute_unprepared(&format!("DROP TABLE IF EXISTS courseflow.{table} CASCADE"))
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS courseflow.role")
            .await?;

        Ok(())
    }
}
