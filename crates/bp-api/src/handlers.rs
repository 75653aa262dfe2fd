//! Handlers HTTP: cada uno traduce una petición a una llamada de servicio y
//! el resultado al sobre de respuesta.
//!
//! La persistencia es bloqueante (Diesel/r2d2), así que cada llamada al
//! servicio corre en `spawn_blocking`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use bp_core::BlueprintError;
use bp_domain::Blueprint;
use tracing::{debug, info};

use crate::dto::{NewBlueprintRequest, PointRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::router::AppState;

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
    where F: FnOnce() -> Result<T, BlueprintError> + Send + 'static,
          T: Send + 'static
{
    tokio::task::spawn_blocking(f).await
                                  .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
                                  .map_err(ApiError::from)
}

/// GET /blueprints
pub async fn list_blueprints_handler(State(state): State<AppState>) -> Result<ApiResponse<Vec<Blueprint>>, ApiError> {
    let services = state.services.clone();
    let all = run_blocking(move || services.get_all_blueprints()).await?;
    debug!(count = all.len(), "listed blueprints");
    Ok(ApiResponse::success(all))
}

/// GET /blueprints/{author}
pub async fn blueprints_by_author_handler(State(state): State<AppState>,
                                          path: Result<Path<String>, PathRejection>)
                                          -> Result<ApiResponse<Vec<Blueprint>>, ApiError> {
    let Path(author) = path?;
    let services = state.services.clone();
    let found = run_blocking(move || services.get_blueprints_by_author(&author)).await?;
    Ok(ApiResponse::success(found))
}

/// GET /blueprints/{author}/{name}
pub async fn blueprint_handler(State(state): State<AppState>,
                               path: Result<Path<(String, String)>, PathRejection>)
                               -> Result<ApiResponse<Blueprint>, ApiError> {
    let Path((author, name)) = path?;
    let services = state.services.clone();
    let bp = run_blocking(move || services.get_blueprint(&author, &name)).await?;
    Ok(ApiResponse::success(bp))
}

/// POST /blueprints
///
/// El cuerpo se valida antes de llegar al servicio: JSON mal formado y
/// autor/nombre en blanco responden 400.
pub async fn create_blueprint_handler(State(state): State<AppState>,
                                      payload: Result<Json<NewBlueprintRequest>, JsonRejection>)
                                      -> Result<ApiResponse<Blueprint>, ApiError> {
    let Json(req) = payload?;
    let bp = Blueprint::try_from(req)?;
    let services = state.services.clone();
    let to_save = bp.clone();
    run_blocking(move || services.add_new_blueprint(&to_save)).await?;
    info!(blueprint = %bp, points = bp.len(), "blueprint created");
    Ok(ApiResponse::created(bp))
}

/// PUT /blueprints/{author}/{name}/points
pub async fn add_point_handler(State(state): State<AppState>,
                               path: Result<Path<(String, String)>, PathRejection>,
                               payload: Result<Json<PointRequest>, JsonRejection>)
                               -> Result<ApiResponse<()>, ApiError> {
    let Path((author, name)) = path?;
    let Json(point) = payload?;
    let services = state.services.clone();
    run_blocking(move || services.add_point(&author, &name, point.x, point.y)).await?;
    Ok(ApiResponse::accepted())
}

/// GET /healthz
pub async fn healthz_handler() -> ApiResponse<&'static str> {
    ApiResponse::success("ok")
}

pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
