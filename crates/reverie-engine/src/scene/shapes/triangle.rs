use crate::coords::{Bounds, Vec2};
use crate::error::EngineError;
use crate::paint::Color;
use crate::scene::{NodeId, Scene};

use super::Shape;

/// Isoceles triangle: apex up at `(0, size/2)`, base corners at
/// `(±size/2, -size/2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    size: f32,
}

impl Triangle {
    pub fn new(size: f32) -> Result<Self, EngineError> {
        if !(size > 0.0) {
            return Err(EngineError::InvalidDimension {
                name: "size",
                value: size,
            });
        }
        Ok(Self { size })
    }

    #[inline]
    pub fn size(self) -> f32 {
        self.size
    }

    pub fn vertices(self) -> [Vec2; 3] {
        let half = self.size / 2.0;
        [
            Vec2::new(0.0, half),
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
        ]
    }

    #[inline]
    pub fn bounds(self) -> Bounds {
        let half = self.size / 2.0;
        Bounds::new(-half, -half, half, half)
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl Scene {
    /// Adds a triangle node.
    pub fn add_triangle(
        &mut self,
        size: f32,
        position: Vec2,
        color: Color,
    ) -> Result<NodeId, EngineError> {
        let id = self.add(Shape::Triangle(Triangle::new(size)?));
        self[id].position = position;
        self[id].color = color;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_wrap_the_vertices() {
        let t = Triangle::new(4.0).unwrap();
        assert_eq!(t.bounds(), Bounds::new(-2.0, -2.0, 2.0, 2.0));
        assert_eq!(t.bounds(), Bounds::from_points(t.vertices()));
    }

    #[test]
    fn rejects_non_positive_size() {
        assert!(matches!(
            Triangle::new(0.0),
            Err(EngineError::InvalidDimension { name: "size", .. })
        ));
    }
}
