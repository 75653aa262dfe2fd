//! bp-api: capa HTTP (axum) sobre `BlueprintsServices`.
//!
//! Todas las respuestas usan el sobre `{code, message, data}` y el status HTTP
//! coincide siempre con `code`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

pub use error::ApiError;
pub use response::ApiResponse;
pub use router::{build_router, AppState};
