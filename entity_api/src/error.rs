//! Error types for the persistence layer.
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use sea_orm::error::DbErr;

/// Failure of a persistence operation. `error_kind` classifies the failure
/// for the layers above; `source` keeps the underlying SeaORM error, when
/// there is one, for logging.
#[derive(Debug, PartialEq)]
pub struct Error {
    pub source: Option<DbErr>,
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // A filter referenced something that cannot be queried
    InvalidQueryTerm,
    // Lookup by id or unique key matched nothing
    RecordNotFound,
    // An update statement affected no rows
    RecordNotUpdated,
    // Insert would duplicate a unique identifier (academic_id)
    RecordAlreadyExists,
    // Credential check failed
    RecordUnauthenticated,
    // Connection, execution, or other database-level failure
    SystemError,
    // Input rejected before touching the database
    ValidationError,
    // Anything else
    Other,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity API Error: {self:?}")
    }
}

impl StdError for Error {}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        let error_kind = match err {
            DbErr::RecordNotFound(_) => EntityApiErrorKind::RecordNotFound,
            DbErr::RecordNotUpdated => EntityApiErrorKind::RecordNotUpdated,
            // Everything else (Conn, ConnectionAcquire, Exec, Query, ...) is a
            // database-level failure the caller cannot act on.
            _ => EntityApiErrorKind::SystemError,
        };

        Error {
            source: Some(err),
            error_kind,
        }
    }
}
