//! bp-persistence
//!
//! Adaptador Postgres (Diesel) del puerto `BlueprintPersistence`.
//!
//! Módulos:
//! - `pg`: implementación sobre las tablas `blueprints` y `points`.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde .env.
//! - `schema`: tablas Diesel declaradas para compilar queries.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use pg::{build_pool, ConnectionProvider, PgBlueprintPersistence, PgPool, PoolProvider};
