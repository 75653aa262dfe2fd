use serde::Serialize;
use std::fmt;

use crate::{DomainError, Point};

/// Plano identificado por `(author, name)` con una secuencia ordenada de
/// puntos. El orden de `points` es el orden de dibujo y debe conservarse tal
/// cual se insertó.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blueprint {
    author: String,
    name: String,
    points: Vec<Point>,
}

impl Blueprint {
    /// Construye un blueprint validando que autor y nombre no estén vacíos
    /// (ni compuestos solo por espacios) ni contengan el carácter NUL, que
    /// ningún texto de Postgres admite.
    pub fn new(author: impl Into<String>, name: impl Into<String>, points: Vec<Point>) -> Result<Self, DomainError> {
        let author = author.into();
        let name = name.into();
        if author.trim().is_empty() {
            return Err(DomainError::Validation("Author cannot be empty".to_string()));
        }
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name cannot be empty".to_string()));
        }
        if author.contains('\0') {
            return Err(DomainError::Validation("Author cannot contain NUL characters".to_string()));
        }
        if name.contains('\0') {
            return Err(DomainError::Validation("Name cannot contain NUL characters".to_string()));
        }
        Ok(Blueprint { author, name, points })
    }

    pub fn author(&self) -> &str { &self.author }
    pub fn name(&self) -> &str { &self.name }
    pub fn points(&self) -> &[Point] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Agrega un punto al final de la secuencia.
    pub fn add_point(&mut self, point: Point) { self.points.push(point); }
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}
