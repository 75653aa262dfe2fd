use thiserror::Error;

/// Errores del dominio de blueprints.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
}
