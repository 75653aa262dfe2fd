use bp_domain::Blueprint;

use crate::errors::BlueprintError;

/// Puerto de persistencia de blueprints.
///
/// Contrato común a todos los adaptadores:
/// - `(author, name)` es único; guardar un duplicado devuelve
///   `BlueprintError::Duplicate` sin modificar lo ya almacenado.
/// - Los puntos se devuelven siempre en el orden en que se escribieron.
/// - Las operaciones que mutan son durables antes de devolver `Ok`.
/// - Los resultados con varios blueprints van en orden de creación.
pub trait BlueprintPersistence: Send + Sync {
    /// Crea el blueprint y todos sus puntos en una sola unidad atómica.
    fn save_blueprint(&self, bp: &Blueprint) -> Result<(), BlueprintError>;
    fn get_blueprint(&self, author: &str, name: &str) -> Result<Blueprint, BlueprintError>;
    /// `NotFound` si el autor no tiene ningún blueprint.
    fn get_blueprints_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError>;
    /// Un resultado vacío es válido.
    fn get_all_blueprints(&self) -> Result<Vec<Blueprint>, BlueprintError>;
    /// Agrega un punto al final de la secuencia del blueprint.
    fn add_point(&self, author: &str, name: &str, x: i32, y: i32) -> Result<(), BlueprintError>;
    /// Elimina el blueprint y, en cascada, sus puntos.
    fn delete_blueprint(&self, author: &str, name: &str) -> Result<(), BlueprintError>;
}
