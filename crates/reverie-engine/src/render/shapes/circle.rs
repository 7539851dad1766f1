use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Frame;

use super::common::{span_end, span_start, to_pixel_space};

/// Disc fill: a pixel is covered when its center lies inside the circle.
pub(crate) fn fill(frame: &mut Frame, center: Vec2, radius: f32, color: Color) {
    let (cx, cy) = to_pixel_space(center, frame.width(), frame.height());
    let r2 = radius * radius;

    let y0 = span_start(cy - radius).max(0);
    let y1 = span_end(cy + radius).min(frame.height() as i64 - 1);
    for y in y0..=y1 {
        let dy = y as f32 + 0.5 - cy;
        // Width of the chord at this row.
        let span = (r2 - dy * dy).max(0.0).sqrt();
        let x0 = span_start(cx - span).max(0);
        let x1 = span_end(cx + span).min(frame.width() as i64 - 1);
        for x in x0..=x1 {
            frame.set(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_covered_far_corner_not() {
        let mut frame = Frame::new(16, 16);
        fill(&mut frame, Vec2::zero(), 4.0, Color::WHITE);
        assert_eq!(frame.get(8, 8), Some(Color::WHITE));
        assert_eq!(frame.get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn clips_at_frame_edges() {
        let mut frame = Frame::new(8, 8);
        // Mostly off-screen to the left.
        fill(&mut frame, Vec2::new(-6.0, 0.0), 4.0, Color::WHITE);
        assert_eq!(frame.get(0, 4), Some(Color::WHITE));
        assert_eq!(frame.get(7, 4), Some(Color::BLACK));
    }
}
