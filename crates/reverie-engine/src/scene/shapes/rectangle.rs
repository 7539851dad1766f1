use crate::coords::{Bounds, Vec2};
use crate::error::EngineError;
use crate::paint::Color;
use crate::scene::{NodeId, Scene};

use super::Shape;

/// Axis-aligned rectangle sized by width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    width: f32,
    height: f32,
}

impl Rectangle {
    pub fn new(width: f32, height: f32) -> Result<Self, EngineError> {
        if !(width > 0.0) {
            return Err(EngineError::InvalidDimension {
                name: "width",
                value: width,
            });
        }
        if !(height > 0.0) {
            return Err(EngineError::InvalidDimension {
                name: "height",
                value: height,
            });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.height
    }

    #[inline]
    pub fn bounds(self) -> Bounds {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        Bounds::new(-hw, -hh, hw, hh)
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 1.0,
        }
    }
}

impl Scene {
    /// Adds a rectangle node.
    pub fn add_rectangle(
        &mut self,
        width: f32,
        height: f32,
        position: Vec2,
        color: Color,
    ) -> Result<NodeId, EngineError> {
        let id = self.add(Shape::Rectangle(Rectangle::new(width, height)?));
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
        assert_eq!(
            Rectangle::default().bounds(),
            Bounds::new(-1.0, -0.5, 1.0, 0.5)
        );
    }

    #[test]
    fn sized_bounds_literal() {
        let r = Rectangle::new(3.0, 2.0).unwrap();
        assert_eq!(r.bounds(), Bounds::new(-1.5, -1.0, 1.5, 1.0));
        assert_eq!(r.bounds().size(), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(
            Rectangle::new(0.0, 1.0),
            Err(EngineError::InvalidDimension { name: "width", .. })
        ));
        assert!(matches!(
            Rectangle::new(1.0, -2.0),
            Err(EngineError::InvalidDimension { name: "height", .. })
        ));
    }
}
