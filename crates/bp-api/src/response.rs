//! Sobre uniforme de respuesta `{code, message, data}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self { Self::with_data(200, "OK", data) }
    pub fn created(data: T) -> Self { Self::with_data(201, "Created", data) }
    pub fn accepted() -> Self { Self::without_data(202, "Accepted") }
    pub fn bad_request(message: impl Into<String>) -> Self { Self::without_data(400, message) }
    pub fn not_found(message: impl Into<String>) -> Self { Self::without_data(404, message) }
    pub fn internal_error(message: impl Into<String>) -> Self { Self::without_data(500, message) }

    fn without_data(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    fn with_data(code: u16, message: &str, data: T) -> Self {
        Self { code, message: message.to_string(), data: Some(data) }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
