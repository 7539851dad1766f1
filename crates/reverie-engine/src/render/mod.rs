//! CPU rendering subsystem.
//!
//! The rasterizer consumes a scene snapshot and produces one [`Frame`] per
//! animation step. It is deliberately deterministic: same scene state, same
//! bytes, every run.
//!
//! Convention:
//! - Scene geometry is in world units (origin at frame center, +Y up).
//! - Frames are pixel space (top-left origin, +Y down); `shapes::common`
//!   owns the conversion.

mod frame;
pub mod shapes;

pub use frame::{Frame, Pixel};

use crate::paint::Color;
use crate::scene::{Scene, Shape};

/// Turns a scene snapshot into pixels. Implementations are called exactly
/// once per animation step.
pub trait Rasterizer {
    fn rasterize(&mut self, scene: &Scene, width: u32, height: u32) -> Frame;
}

/// Deterministic software rasterizer: solid fills in draw order over a
/// solid background.
#[derive(Debug, Clone)]
pub struct CpuRasterizer {
    pub background: Color,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
        }
    }
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for CpuRasterizer {
    fn rasterize(&mut self, scene: &Scene, width: u32, height: u32) -> Frame {
        let mut frame = Frame::new(width, height);
        frame.clear(self.background);

        for node in scene.iter() {
            match &node.shape {
                Shape::Point => {
                    shapes::point::fill(&mut frame, node.position, node.color);
                }
                Shape::Circle(circle) => {
                    shapes::circle::fill(&mut frame, node.position, circle.radius(), node.color);
                }
                Shape::Square(square) => {
                    shapes::rect::fill(
                        &mut frame,
                        square.bounds().translated(node.position),
                        node.color,
                    );
                }
                Shape::Rectangle(rect) => {
                    shapes::rect::fill(
                        &mut frame,
                        rect.bounds().translated(node.position),
                        node.color,
                    );
                }
                Shape::Triangle(tri) => {
                    shapes::triangle::fill(&mut frame, node.position, tri, node.color);
                }
                Shape::Path(path) => {
                    shapes::path::fill(&mut frame, node.position, path, node.color);
                }
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::scene::shapes::Square;

    fn render(scene: &Scene) -> Frame {
        CpuRasterizer::new().rasterize(scene, 16, 16)
    }

    #[test]
    fn empty_scene_is_background_only() {
        let frame = render(&Scene::new());
        assert!(frame.pixels().iter().all(|p| *p == Pixel::from(Color::BLACK)));
    }

    #[test]
    fn draw_order_is_insertion_order() {
        let mut scene = Scene::new();
        scene
            .add_square(8.0, Vec2::zero(), Color::WHITE)
            .unwrap();
        scene.add_square(8.0, Vec2::zero(), Color::BLUE).unwrap();
        // The later square overwrites the earlier one.
        assert_eq!(render(&scene).get(8, 8), Some(Color::BLUE));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut scene = Scene::new();
        scene
            .add_circle(4.0, Vec2::new(2.0, -1.0), Color::WHITE)
            .unwrap();
        scene.add(Shape::Square(Square::default()));
        let a = render(&scene);
        let b = render(&scene);
        assert_eq!(a, b);
    }
}
