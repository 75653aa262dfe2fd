//! Errores del puerto de persistencia y de la capa de servicios.

use bp_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BlueprintError {
    #[error("{0}")] Duplicate(String),
    #[error("{0}")] NotFound(String),
    #[error("{0}")] Validation(String),
    #[error("store failure: {0}")] Store(String),
}

impl BlueprintError {
    pub fn duplicate(author: &str, name: &str) -> Self {
        Self::Duplicate(format!("Blueprint already exists: {author}/{name}"))
    }

    pub fn not_found(author: &str, name: &str) -> Self {
        Self::NotFound(format!("Blueprint not found: {author}/{name}"))
    }

    pub fn author_not_found(author: &str) -> Self {
        Self::NotFound(format!("No blueprints for author: {author}"))
    }
}

impl From<DomainError> for BlueprintError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}
