//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas y, desde ahí, a
//! los errores del puerto (`BlueprintError`).

use bp_core::BlueprintError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not found")]
    NotFound,
    #[error("serialization conflict (retryable)")]
    SerializationConflict,
    #[error("transient IO / connection pool error: {0}")]
    TransientIo(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(info.message().to_string()),
                DatabaseErrorKind::SerializationFailure => Self::SerializationConflict,
                DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::BrokenTransactionManager => Self::TransientIo("broken transaction manager".into()),
            DieselError::RollbackErrorOnCommit { rollback_error, commit_error } => {
                Self::Unknown(format!("rollback={rollback_error}; commit={commit_error}"))
            }
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<r2d2::Error> for PersistenceError {
    fn from(err: r2d2::Error) -> Self { Self::TransientIo(format!("pool error: {err}")) }
}

impl PersistenceError {
    /// Traduce el error al puerto con el contexto `(author, name)` de la
    /// operación. Solo `NotFound` y `UniqueViolation` tienen significado de
    /// dominio; el resto es una falla del store sin clasificar.
    pub fn into_blueprint_error(self, author: &str, name: &str) -> BlueprintError {
        match self {
            Self::NotFound => BlueprintError::not_found(author, name),
            Self::UniqueViolation(_) => BlueprintError::duplicate(author, name),
            other => BlueprintError::Store(other.to_string()),
        }
    }
}

impl From<PersistenceError> for BlueprintError {
    fn from(err: PersistenceError) -> Self { BlueprintError::Store(err.to_string()) }
}
