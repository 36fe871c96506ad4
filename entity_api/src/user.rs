use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::users::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, DbErr, RuntimeErr, Set, Unchanged};

pub use entity::roles::Role;

/// Inserts a new user row, hashing the supplied plaintext password.
/// Fails with `RecordAlreadyExists` when the academic id is taken.
pub async fn create(db: &impl ConnectionTrait, user_model: Model) -> Result<Model, Error> {
    debug!("New User Model to be inserted: {user_model:?}");

    if find_by_academic_id(db, &user_model.academic_id)
        .await?
        .is_some()
    {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordAlreadyExists,
        });
    }

    let now = Utc::now();
    let user_active_model = ActiveModel {
        academic_id: Set(user_model.academic_id),
        first_name: Set(user_model.first_name),
        last_name: Set(user_model.last_name),
        email: Set(user_model.email),
        password: Set(generate_hash(user_model.password)),
        role: Set(user_model.role),
        department_id: Set(user_model.department_id),
        token_version: Set(0),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    // Two concurrent registers can both pass the lookup above; the
    // UNIQUE(academic_id) constraint then rejects the loser here.
    match user_active_model.insert(db).await {
        Ok(user) => Ok(user),
        Err(err) if is_unique_violation(&err) => Err(Error {
            source: Some(err),
            error_kind: EntityApiErrorKind::RecordAlreadyExists,
        }),
        Err(err) => Err(err.into()),
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e))) => e.is_unique_violation(),
        _ => false,
    }
}

pub async fn find_by_academic_id(
    db: &impl ConnectionTrait,
    academic_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::AcademicId.eq(academic_id))
        .one(db)
        .await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Replaces the password hash and bumps `token_version`, which invalidates
/// every refresh token issued before this call.
pub async fn update_password(
    db: &impl ConnectionTrait,
    user_id: Id,
    new_password: String,
) -> Result<Model, Error> {
    let user = find_by_id(db, user_id).await?;

    let active_model = ActiveModel {
        id: Unchanged(user.id),
        password: Set(generate_hash(new_password)),
        token_version: Set(user.token_version + 1),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.update(db).await?)
}

pub async fn verify_password(password_to_verify: &str, password_hash: &str) -> Result<(), Error> {
    match password_auth::verify_password(password_to_verify, password_hash) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        }),
    }
}

pub fn generate_hash(password: String) -> String {
    password_auth::generate_hash(password)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(token_version: i32) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 1,
            academic_id: "S1001".to_owned(),
            first_name: "Noah".to_owned(),
            last_name: "Kim".to_owned(),
            email: "noah.kim@courseflow.dev".to_owned(),
            password: generate_hash("password".to_owned()),
            role: Role::Student,
            department_id: 1,
            token_version,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_academic_id() {
        let existing = test_user(0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![existing.clone()]])
            .into_connection();

        let result = create(&db, existing).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordAlreadyExists
        );
    }

    // Stands in for the database error Postgres raises when the
    // UNIQUE(academic_id) constraint rejects an insert.
    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", sqlx::error::DatabaseError::message(self))
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_academic_id_key\""
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some("23505".into())
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    // Two concurrent registers can both pass the duplicate lookup; the one
    // losing the insert race must still surface as RecordAlreadyExists, not
    // as a SystemError.
    #[tokio::test]
    async fn create_maps_a_unique_violation_on_insert_to_already_exists() {
        let unique_violation = DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(
            Box::new(DuplicateKey),
        )));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(Vec::<Vec<Model>>::from([vec![]]))
            .append_query_errors([unique_violation])
            .into_connection();

        let result = create(&db, test_user(0)).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordAlreadyExists
        );
    }

    #[tokio::test]
    async fn update_password_increments_token_version() -> Result<(), Error> {
        let user = test_user(3);
        let mut updated = user.clone();
        updated.token_version = 4;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user.clone()], vec![updated.clone()]])
            .into_connection();

        let result = update_password(&db, user.id, "new-password".to_owned()).await?;

        assert_eq!(result.token_version, 4);

        Ok(())
    }

    #[tokio::test]
    async fn verify_password_rejects_wrong_password() {
        let hash = generate_hash("correct".to_owned());

        let result = verify_password("wrong", &hash).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordUnauthenticated
        );
    }
}
