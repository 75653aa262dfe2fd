use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordenada 2D dentro de un blueprint. No tiene identidad propia: su
/// posición en la secuencia del blueprint es lo único que la distingue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self { Self { x, y } }
    pub fn x(&self) -> i32 { self.x }
    pub fn y(&self) -> i32 { self.y }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self { Point::new(x, y) }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
