//! bp-core: puerto de persistencia y capa de servicios de blueprints.
pub mod errors;
pub mod persistence;
pub mod services;

pub use errors::BlueprintError;
pub use persistence::{BlueprintPersistence, InMemoryBlueprintPersistence};
pub use services::BlueprintsServices;
