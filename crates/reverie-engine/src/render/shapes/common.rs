use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Frame;

/// World → pixel-space conversion (still fractional).
///
/// World origin maps to the frame center; +Y up becomes +Y down.
#[inline]
pub(crate) fn to_pixel_space(p: Vec2, width: u32, height: u32) -> (f32, f32) {
    (
        width as f32 / 2.0 + p.x,
        height as f32 / 2.0 - p.y,
    )
}

/// First pixel column/row whose center lies at or after `edge`.
#[inline]
pub(crate) fn span_start(edge: f32) -> i64 {
    (edge - 0.5).ceil() as i64
}

/// Last pixel column/row whose center lies at or before `edge`.
#[inline]
pub(crate) fn span_end(edge: f32) -> i64 {
    (edge - 0.5).floor() as i64
}

/// Even-odd scanline fill of a closed polygon given in pixel space.
///
/// The polygon is implicitly closed (last vertex connects back to the
/// first). Degenerate inputs with fewer than three vertices fill nothing.
pub(crate) fn fill_polygon(frame: &mut Frame, points: &[(f32, f32)], color: Color) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
    let y0 = span_start(min_y).max(0);
    let y1 = span_end(max_y).min(frame.height() as i64 - 1);

    let mut crossings: Vec<f32> = Vec::new();
    for y in y0..=y1 {
        let sample = y as f32 + 0.5;

        crossings.clear();
        for i in 0..points.len() {
            let (ax, ay) = points[i];
            let (bx, by) = points[(i + 1) % points.len()];
            // Half-open in y so a vertex on the scanline counts once.
            if (ay <= sample && by > sample) || (by <= sample && ay > sample) {
                let t = (sample - ay) / (by - ay);
                crossings.push(ax + t * (bx - ax));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = span_start(pair[0]).max(0);
            let x1 = span_end(pair[1]).min(frame.width() as i64 - 1);
            for x in x0..=x1 {
                frame.set(x as u32, y as u32, color);
            }
        }
    }
}
