//! Vector math and bounding boxes shared across the engine.
//!
//! Canonical scene space:
//! - World units, origin at the frame center
//! - +X right, +Y up
//!
//! The rasterizer converts to pixel space (top-left origin, +Y down)
//! when a frame is produced.

mod bounds;
mod vec2;
mod vec3;

pub use bounds::Bounds;
pub use vec2::Vec2;
pub use vec3::Vec3;
