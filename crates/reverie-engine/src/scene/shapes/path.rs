use svgtypes::{PathParser, PathSegment};

use crate::coords::{Bounds, Vec2};
use crate::error::EngineError;
use crate::paint::Color;
use crate::scene::{NodeId, Scene};

use super::Shape;

/// Number of line segments a quadratic/cubic curve is flattened into.
/// Fixed so the same builder calls always produce the same polyline.
const CURVE_SEGMENTS: usize = 16;

/// A closed or open polyline, built by [`PathBuilder`] and recentered on
/// its bounding-box midpoint so `bounds` is symmetric around the origin
/// like every other shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    points: Vec<Vec2>,
    bounds: Bounds,
}

impl PathShape {
    /// Parses SVG path data (`"M 0 0 L 10 0 ..."`).
    ///
    /// SVG's +Y-down axis is flipped into scene space. Unsupported segment
    /// kinds (arcs, smooth curves) are skipped.
    pub fn from_svg(d: &str) -> Self {
        let mut builder = PathBuilder::new();
        for segment in PathParser::from(d).flatten() {
            builder.push_svg(segment);
        }
        builder.build()
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Incremental polyline builder with curve flattening.
#[derive(Debug, Default)]
pub struct PathBuilder {
    points: Vec<Vec2>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn last(&self) -> Vec2 {
        self.points.last().copied().unwrap_or(Vec2::zero())
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.points.push(Vec2::new(x, y));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.points.push(Vec2::new(x, y));
    }

    pub fn h_line_to(&mut self, x: f32) {
        let y = self.last().y;
        self.line_to(x, y);
    }

    pub fn v_line_to(&mut self, y: f32) {
        let x = self.last().x;
        self.line_to(x, y);
    }

    /// Quadratic curve to `(x, y)` with control point `(cx, cy)`.
    pub fn quad_to(&mut self, x: f32, y: f32, cx: f32, cy: f32) {
        let p0 = self.last();
        let c = Vec2::new(cx, cy);
        let p1 = Vec2::new(x, y);
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            self.points
                .push(p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t));
        }
    }

    /// Cubic curve to `(x, y)` with control points `(cx1, cy1)`, `(cx2, cy2)`.
    pub fn cubic_to(&mut self, x: f32, y: f32, cx1: f32, cy1: f32, cx2: f32, cy2: f32) {
        let p0 = self.last();
        let c1 = Vec2::new(cx1, cy1);
        let c2 = Vec2::new(cx2, cy2);
        let p1 = Vec2::new(x, y);
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            self.points.push(
                p0 * (u * u * u)
                    + c1 * (3.0 * u * u * t)
                    + c2 * (3.0 * u * t * t)
                    + p1 * (t * t * t),
            );
        }
    }

    /// Closes the outline by returning to the first point.
    pub fn close(&mut self) {
        if let Some(&first) = self.points.first() {
            self.points.push(first);
        }
    }

    /// Finishes the path, recentering the outline on its bounding-box
    /// midpoint so the resulting bounds are origin-symmetric.
    pub fn build(self) -> PathShape {
        let Self { mut points } = self;
        if points.is_empty() {
            return PathShape {
                points,
                bounds: Bounds::empty(),
            };
        }
        let center = Bounds::from_points(points.iter().copied()).center();
        for p in &mut points {
            *p -= center;
        }
        let bounds = Bounds::from_points(points.iter().copied());
        PathShape { points, bounds }
    }

    fn push_svg(&mut self, segment: PathSegment) {
        let abs = match segment {
            PathSegment::MoveTo { abs, .. }
            | PathSegment::LineTo { abs, .. }
            | PathSegment::HorizontalLineTo { abs, .. }
            | PathSegment::VerticalLineTo { abs, .. }
            | PathSegment::Quadratic { abs, .. }
            | PathSegment::CurveTo { abs, .. } => abs,
            _ => true,
        };
        // Relative segments offset from the current point; the Y flip turns
        // SVG's +Y-down into scene +Y-up.
        let (rx, ry) = if abs {
            (0.0, 0.0)
        } else {
            let last = self.last();
            (last.x as f64, last.y as f64)
        };

        match segment {
            PathSegment::MoveTo { x, y, .. } => {
                self.move_to((rx + x) as f32, (ry - y) as f32);
            }
            PathSegment::LineTo { x, y, .. } => {
                self.line_to((rx + x) as f32, (ry - y) as f32);
            }
            PathSegment::HorizontalLineTo { x, .. } => {
                self.h_line_to((rx + x) as f32);
            }
            PathSegment::VerticalLineTo { y, .. } => {
                self.v_line_to((ry - y) as f32);
            }
            PathSegment::Quadratic { x1, y1, x, y, .. } => {
                self.quad_to(
                    (rx + x) as f32,
                    (ry - y) as f32,
                    (rx + x1) as f32,
                    (ry - y1) as f32,
                );
            }
            PathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
                ..
            } => {
                self.cubic_to(
                    (rx + x) as f32,
                    (ry - y) as f32,
                    (rx + x1) as f32,
                    (ry - y1) as f32,
                    (rx + x2) as f32,
                    (ry - y2) as f32,
                );
            }
            PathSegment::ClosePath { .. } => self.close(),
            _ => {}
        }
    }
}

impl Scene {
    /// Adds a path node. Degenerate (empty) paths are allowed; they render
    /// nothing, so there is no dimension to validate.
    pub fn add_path(
        &mut self,
        path: PathShape,
        position: Vec2,
        color: Color,
    ) -> Result<NodeId, EngineError> {
        let id = self.add(Shape::Path(path));
        self[id].position = position;
        self[id].color = color;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── builder ───────────────────────────────────────────────────────────

    #[test]
    fn offset_square_is_recentered() {
        let mut b = PathBuilder::new();
        b.move_to(10.0, 10.0);
        b.line_to(14.0, 10.0);
        b.line_to(14.0, 14.0);
        b.line_to(10.0, 14.0);
        b.close();
        let path = b.build();
        assert_eq!(path.bounds(), Bounds::new(-2.0, -2.0, 2.0, 2.0));
        assert_eq!(path.points()[0], Vec2::new(-2.0, -2.0));
        // close() returned to the (recentered) starting point
        assert_eq!(path.points().last(), path.points().first());
    }

    #[test]
    fn empty_build_has_empty_bounds() {
        assert_eq!(PathBuilder::new().build().bounds(), Bounds::empty());
    }

    #[test]
    fn quad_flatten_ends_on_endpoint() {
        let mut b = PathBuilder::new();
        b.move_to(0.0, 0.0);
        b.quad_to(4.0, 0.0, 2.0, 2.0);
        let path = b.build();
        let first = path.points().first().copied().unwrap();
        let last = path.points().last().copied().unwrap();
        // Curve spans (0,0) → (4,0); after recentering the endpoints sit
        // symmetrically about x = 0.
        assert_eq!(first.x, -last.x);
        assert_eq!(first.y, last.y);
    }

    // ── svg parsing ───────────────────────────────────────────────────────

    #[test]
    fn svg_square_bounds() {
        let path = PathShape::from_svg("M 0 0 L 10 0 L 10 10 L 0 10 Z");
        assert_eq!(path.bounds(), Bounds::new(-5.0, -5.0, 5.0, 5.0));
    }

    #[test]
    fn svg_y_axis_is_flipped() {
        // Before recentering: (0,0) → (0,-10); the later point must be the
        // lower one in scene space.
        let path = PathShape::from_svg("M 0 0 V 10");
        let first = path.points().first().copied().unwrap();
        let last = path.points().last().copied().unwrap();
        assert!(last.y < first.y);
    }

    #[test]
    fn svg_relative_segments_accumulate() {
        let path = PathShape::from_svg("m 1 1 l 4 0 l 0 4");
        assert_eq!(path.bounds().size(), Vec2::new(4.0, 4.0));
    }
}
