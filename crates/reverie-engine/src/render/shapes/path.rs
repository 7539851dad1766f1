use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Frame;
use crate::scene::shapes::PathShape;

use super::common::{fill_polygon, to_pixel_space};

/// Paths render as filled polygons over their flattened outline.
pub(crate) fn fill(frame: &mut Frame, position: Vec2, path: &PathShape, color: Color) {
    if path.points().len() < 3 {
        log::debug!("skipping degenerate path ({} points)", path.points().len());
        return;
    }
    let points: Vec<(f32, f32)> = path
        .points()
        .iter()
        .map(|&p| to_pixel_space(p + position, frame.width(), frame.height()))
        .collect();
    fill_polygon(frame, &points, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::shapes::PathBuilder;

    #[test]
    fn filled_square_path_covers_center() {
        let mut b = PathBuilder::new();
        b.move_to(-4.0, 4.0);
        b.line_to(-4.0, -4.0);
        b.line_to(4.0, -4.0);
        b.line_to(4.0, 4.0);
        b.close();
        let path = b.build();

        let mut frame = Frame::new(16, 16);
        fill(&mut frame, Vec2::zero(), &path, Color::WHITE);
        assert_eq!(frame.get(8, 8), Some(Color::WHITE));
        assert_eq!(frame.get(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn degenerate_path_renders_nothing() {
        let mut b = PathBuilder::new();
        b.move_to(0.0, 0.0);
        b.line_to(2.0, 0.0);
        let path = b.build();

        let mut frame = Frame::new(8, 8);
        fill(&mut frame, Vec2::zero(), &path, Color::WHITE);
        assert_eq!(frame.get(4, 4), Some(Color::BLACK));
    }
}
