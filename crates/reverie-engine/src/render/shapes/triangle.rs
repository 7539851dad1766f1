use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Frame;
use crate::scene::shapes::Triangle;

use super::common::{fill_polygon, to_pixel_space};

pub(crate) fn fill(frame: &mut Frame, position: Vec2, tri: &Triangle, color: Color) {
    let points: Vec<(f32, f32)> = tri
        .vertices()
        .iter()
        .map(|&v| to_pixel_space(v + position, frame.width(), frame.height()))
        .collect();
    fill_polygon(frame, &points, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_covered_corners_not() {
        let mut frame = Frame::new(16, 16);
        let tri = Triangle::new(10.0).unwrap();
        fill(&mut frame, Vec2::zero(), &tri, Color::WHITE);
        // Apex-up triangle covers the center...
        assert_eq!(frame.get(8, 8), Some(Color::WHITE));
        // ...but not the top corners of its bounding box.
        assert_eq!(frame.get(3, 3), Some(Color::BLACK));
        assert_eq!(frame.get(12, 3), Some(Color::BLACK));
    }
}
