//! Configuración central de la aplicación.
//! Carga variables de entorno (.env incluido) y expone una estructura
//! inmutable `AppConfig` con las secciones de servidor, almacenamiento y base
//! de datos.

use std::env;
use std::net::SocketAddr;

use bp_persistence::DbConfig;

use crate::errors::CoreError;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Backend de persistencia a usar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StorageKind::Postgres),
            "memory" | "in-memory" => Ok(StorageKind::Memory),
            other => Err(CoreError::Config(format!("BLUEPRINTS_STORAGE desconocido: {other}"))),
        }
    }
}

/// Parámetros del servidor HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageKind,
    /// Solo presente con `StorageKind::Postgres`.
    pub database: Option<DbConfig>,
    /// Logs en JSON en lugar de formato legible.
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        bp_persistence::init_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let raw_bind = lookup("BLUEPRINTS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = raw_bind.trim()
                                       .parse()
                                       .map_err(|_| CoreError::Config(format!("BLUEPRINTS_BIND inválido: {raw_bind}")))?;
        let storage = match lookup("BLUEPRINTS_STORAGE") {
            Some(v) => v.parse()?,
            None => StorageKind::Postgres,
        };
        let database = match storage {
            StorageKind::Postgres => Some(DbConfig::from_lookup(&lookup)?),
            StorageKind::Memory => None,
        };
        let log_json = match lookup("BLUEPRINTS_LOG_JSON") {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| CoreError::Config(format!("BLUEPRINTS_LOG_JSON inválido: {v}")))?,
        };
        Ok(AppConfig { server: ServerConfig { bind }, storage, database, log_json })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
