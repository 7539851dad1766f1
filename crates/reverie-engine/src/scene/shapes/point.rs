use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{NodeId, Scene};

use super::Shape;

impl Scene {
    /// Adds a single-pixel point. Points have zero-size bounds and no size
    /// parameters, so this constructor cannot fail.
    pub fn add_point(&mut self, position: Vec2, color: Color) -> NodeId {
        let id = self.add(Shape::Point);
        self[id].position = position;
        self[id].color = color;
        id
    }
}
