use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Frame;

use super::common::to_pixel_space;

/// A point fills the single pixel containing its position.
pub(crate) fn fill(frame: &mut Frame, position: Vec2, color: Color) {
    let (px, py) = to_pixel_space(position, frame.width(), frame.height());
    if px < 0.0 || py < 0.0 {
        return;
    }
    frame.set(px.floor() as u32, py.floor() as u32, color);
}
