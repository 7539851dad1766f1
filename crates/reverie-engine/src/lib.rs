//! Reverie engine crate.
//!
//! A creative-coding engine: scripts build a scene of 2D primitives,
//! advance it through deterministic time steps, optionally evaluate a
//! per-pixel kernel, and stream the rendered frames to a video encoder.
//!
//! The usual flow:
//!
//! ```no_run
//! use reverie_engine::{Color, Stage, Vec2};
//!
//! # fn main() -> Result<(), reverie_engine::EngineError> {
//! let mut stage = Stage::new();
//! let ball = stage
//!     .scene_mut()
//!     .add_circle(40.0, Vec2::new(-400.0, 0.0), Color::WHITE)?;
//!
//! stage.record("bounce.mp4")?;
//! stage.animate(5.0, |stage, _step| {
//!     stage.scene_mut()[ball].position.x += 4.0;
//! })?;
//! stage.stop()?;
//! # Ok(())
//! # }
//! ```

pub mod coords;
pub mod error;
pub mod logging;
pub mod output;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;

mod kernel;
mod stage;

pub use coords::{Bounds, Vec2, Vec3};
pub use error::EngineError;
pub use kernel::KernelHandle;
pub use paint::Color;
pub use render::{CpuRasterizer, Frame, Rasterizer};
pub use scene::{Node, NodeId, Scene, Shape};
pub use stage::{DEFAULT_OUTPUT_PATH, Stage};
pub use time::{DEFAULT_FPS, Ease, Step, StepSequence, interpolate};
