//! Capa de servicios: orquesta las llamadas al puerto de persistencia.
//!
//! No agrega reglas de negocio propias; unicidad y existencia las garantiza
//! la persistencia y sus errores se propagan sin cambios.

use std::sync::Arc;

use bp_domain::Blueprint;
use log::debug;

use crate::errors::BlueprintError;
use crate::persistence::BlueprintPersistence;

#[derive(Clone)]
pub struct BlueprintsServices {
    persistence: Arc<dyn BlueprintPersistence>,
}

impl BlueprintsServices {
    pub fn new(persistence: Arc<dyn BlueprintPersistence>) -> Self {
        Self { persistence }
    }

    pub fn add_new_blueprint(&self, bp: &Blueprint) -> Result<(), BlueprintError> {
        debug!("add_new_blueprint bp={bp}");
        self.persistence.save_blueprint(bp)
    }

    pub fn get_all_blueprints(&self) -> Result<Vec<Blueprint>, BlueprintError> {
        self.persistence.get_all_blueprints()
    }

    pub fn get_blueprints_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError> {
        self.persistence.get_blueprints_by_author(author)
    }

    pub fn get_blueprint(&self, author: &str, name: &str) -> Result<Blueprint, BlueprintError> {
        self.persistence.get_blueprint(author, name)
    }

    pub fn add_point(&self, author: &str, name: &str, x: i32, y: i32) -> Result<(), BlueprintError> {
        debug!("add_point bp={author}/{name} x={x} y={y}");
        self.persistence.add_point(author, name, x, y)
    }
}
