//! Output configuration and the encoder bridge.
//!
//! Responsibilities:
//! - hold the camera/output state (resolution, frame rate)
//! - bridge rendered frames to the external video encoder through the
//!   [`FrameSink`] boundary
//! - guarantee the encoder handle is released exactly once per session

mod config;
mod recorder;
mod sink;

pub use config::OutputConfig;
pub use recorder::Recorder;
pub use sink::{Captured, FfmpegSink, FrameSink, MemorySink, RawSink, SinkConfig};
