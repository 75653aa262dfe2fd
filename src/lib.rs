//! Blueprints server library
//!
//! Arma el servidor a partir de los crates del workspace:
//! - `config`: carga de `AppConfig` desde el entorno.
//! - `errors`: errores de arranque (`CoreError`).
//! - `telemetry`: inicialización de logs (`tracing`).
//! - `build_persistence` / `build_app`: cableado persistencia → servicios → router.

pub mod config;
pub mod errors;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use bp_api::{build_router, AppState};
use bp_core::{BlueprintPersistence, BlueprintsServices, InMemoryBlueprintPersistence};
use bp_persistence::{build_pool, PgBlueprintPersistence, PoolProvider};
use tracing::info;

use crate::config::{AppConfig, StorageKind};
use crate::errors::CoreError;

/// Construye el adaptador de persistencia configurado. Con Postgres crea el
/// pool y aplica migraciones (operación bloqueante).
pub fn build_persistence(cfg: &AppConfig) -> Result<Arc<dyn BlueprintPersistence>, CoreError> {
    match cfg.storage {
        StorageKind::Memory => {
            info!("using in-memory blueprint storage");
            Ok(Arc::new(InMemoryBlueprintPersistence::new()))
        }
        StorageKind::Postgres => {
            let db = cfg.database
                        .as_ref()
                        .ok_or_else(|| CoreError::Config("postgres storage requires DATABASE_URL".into()))?;
            let pool = build_pool(&db.url, db.min_connections, db.max_connections)?;
            info!(min = db.min_connections, max = db.max_connections, "postgres pool ready");
            Ok(Arc::new(PgBlueprintPersistence::new(PoolProvider { pool })))
        }
    }
}

pub fn build_app(persistence: Arc<dyn BlueprintPersistence>) -> Router {
    build_router(AppState::new(BlueprintsServices::new(persistence)))
}
