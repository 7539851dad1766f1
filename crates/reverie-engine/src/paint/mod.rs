//! Color model shared between the scene and the rasterizer.
//!
//! Scope:
//! - straight (non-premultiplied) RGBA8 color
//! - hex-literal parsing for script-facing constructors
//!
//! Geometry types remain in `coords`.

mod color;

pub use color::Color;
