//! Cuerpos de petición.

use bp_domain::{Blueprint, DomainError, Point};
use serde::Deserialize;

/// `POST /blueprints`. `points` es opcional y por defecto vacío.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlueprintRequest {
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl TryFrom<NewBlueprintRequest> for Blueprint {
    type Error = DomainError;

    fn try_from(req: NewBlueprintRequest) -> Result<Self, Self::Error> {
        Blueprint::new(req.author, req.name, req.points)
    }
}

/// `PUT /blueprints/{author}/{name}/points`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointRequest {
    pub x: i32,
    pub y: i32,
}
