use crate::coords::Bounds;
use crate::paint::Color;
use crate::render::Frame;

use super::common::{span_end, span_start, to_pixel_space};

/// Axis-aligned fill shared by `Square` and `Rectangle`: a pixel is
/// covered when its center lies inside the world-space box.
pub(crate) fn fill(frame: &mut Frame, bounds: Bounds, color: Color) {
    let (left, bottom) = to_pixel_space(bounds.min, frame.width(), frame.height());
    let (right, top) = to_pixel_space(bounds.max, frame.width(), frame.height());

    let x0 = span_start(left).max(0);
    let x1 = span_end(right).min(frame.width() as i64 - 1);
    // +Y up flips: bounds.max.y is the top edge, the smaller pixel row.
    let y0 = span_start(top).max(0);
    let y1 = span_end(bottom).min(frame.height() as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            frame.set(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_exact_pixel_box() {
        let mut frame = Frame::new(8, 8);
        fill(&mut frame, Bounds::new(-2.0, -1.0, 2.0, 1.0), Color::WHITE);
        // Pixel space: x in [2, 6), y in [3, 5).
        assert_eq!(frame.get(2, 3), Some(Color::WHITE));
        assert_eq!(frame.get(5, 4), Some(Color::WHITE));
        assert_eq!(frame.get(1, 3), Some(Color::BLACK));
        assert_eq!(frame.get(6, 4), Some(Color::BLACK));
        assert_eq!(frame.get(2, 2), Some(Color::BLACK));
        assert_eq!(frame.get(2, 5), Some(Color::BLACK));
    }

    #[test]
    fn fully_offscreen_fills_nothing() {
        let mut frame = Frame::new(4, 4);
        fill(&mut frame, Bounds::new(10.0, 10.0, 12.0, 12.0), Color::WHITE);
        assert!((0..4).all(|y| (0..4).all(|x| frame.get(x, y) == Some(Color::BLACK))));
    }
}
