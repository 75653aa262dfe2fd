//! Errores de la capa HTTP y su traducción al sobre de respuesta.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use bp_core::BlueprintError;
use bp_domain::DomainError;
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;

/// Mensaje genérico para fallas internas; el detalle solo va al log.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }
}

impl From<BlueprintError> for ApiError {
    fn from(e: BlueprintError) -> Self {
        match e {
            BlueprintError::Duplicate(msg) | BlueprintError::Validation(msg) => ApiError::BadRequest(msg),
            BlueprintError::NotFound(msg) => ApiError::NotFound(msg),
            BlueprintError::Store(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text())) }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(format!("Invalid path: {}", rejection.body_text())) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::BadRequest(msg) => ApiResponse::<()>::bad_request(msg),
            ApiError::NotFound(msg) => ApiResponse::<()>::not_found(msg),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "internal error while serving request");
                ApiResponse::<()>::internal_error(INTERNAL_MESSAGE)
            }
        };
        body.into_response()
    }
}
