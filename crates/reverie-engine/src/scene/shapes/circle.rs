use crate::coords::{Bounds, Vec2};
use crate::error::EngineError;
use crate::paint::Color;
use crate::scene::{NodeId, Scene};

use super::Shape;

/// Circle sized by radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self, EngineError> {
        if !(radius > 0.0) {
            return Err(EngineError::InvalidDimension {
                name: "radius",
                value: radius,
            });
        }
        Ok(Self { radius })
    }

    #[inline]
    pub fn radius(self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn bounds(self) -> Bounds {
        Bounds::new(-self.radius, -self.radius, self.radius, self.radius)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl Scene {
    /// Adds a circle node.
    pub fn add_circle(
        &mut self,
        radius: f32,
        position: Vec2,
        color: Color,
    ) -> Result<NodeId, EngineError> {
        let id = self.add(Shape::Circle(Circle::new(radius)?));
        self[id].position = position;
        self[id].color = color;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_symmetric() {
        let c = Circle::new(3.0).unwrap();
        assert_eq!(c.bounds(), Bounds::new(-3.0, -3.0, 3.0, 3.0));
        assert_eq!(c.bounds().size(), Vec2::new(6.0, 6.0));
    }

    #[test]
    fn default_radius_is_one() {
        assert_eq!(Circle::default().radius(), 1.0);
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(matches!(
            Circle::new(0.0),
            Err(EngineError::InvalidDimension { name: "radius", .. })
        ));
        assert!(Circle::new(-2.0).is_err());
        assert!(Circle::new(f32::NAN).is_err());
    }
}
