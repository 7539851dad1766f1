use crate::coords::{Bounds, Vec2};
use crate::error::EngineError;
use crate::paint::Color;
use crate::scene::{NodeId, Scene};

use super::Shape;

/// Axis-aligned square sized by side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    size: f32,
}

impl Square {
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

    #[inline]
    pub fn bounds(self) -> Bounds {
        let half = self.size / 2.0;
        Bounds::new(-half, -half, half, half)
    }
}

impl Default for Square {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl Scene {
    /// Adds a square node.
    pub fn add_square(
        &mut self,
        size: f32,
        position: Vec2,
        color: Color,
    ) -> Result<NodeId, EngineError> {
        let id = self.add(Shape::Square(Square::new(size)?));
        self[id].position = position;
        self[id].color = color;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_literal() {
        assert_eq!(Square::default().bounds(), Bounds::new(-0.5, -0.5, 0.5, 0.5));
    }

    #[test]
    fn sized_bounds_literal() {
        let s = Square::new(5.0).unwrap();
        assert_eq!(s.bounds(), Bounds::new(-2.5, -2.5, 2.5, 2.5));
        assert_eq!(s.bounds().size(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn rejects_non_positive_size() {
        assert!(matches!(
            Square::new(-1.0),
            Err(EngineError::InvalidDimension { name: "size", .. })
        ));
        assert!(Square::new(0.0).is_err());
    }
}
