use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::error::EngineError;
use crate::render::Frame;

/// Parameters of one encoding session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

/// The external-encoder boundary.
///
/// The engine only ever pushes an ordered stream of frames through this
/// trait and never inspects container internals. Every method is fallible;
/// I/O failures surface as [`EngineError::EncodingFailed`].
pub trait FrameSink: Send {
    fn begin(&mut self, config: &SinkConfig) -> Result<(), EngineError>;
    fn submit(&mut self, frame: &Frame) -> Result<(), EngineError>;
    fn finalize(&mut self) -> Result<(), EngineError>;
}

// ── ffmpeg subprocess sink ────────────────────────────────────────────────

/// Streams raw RGBA frames to the system `ffmpeg` binary.
///
/// `ffmpeg` must be on `PATH`; a missing binary surfaces a structured
/// error on `begin`, there is no silent fallback. The container format is
/// whatever ffmpeg infers from the output path.
#[derive(Debug, Default)]
pub struct FfmpegSink {
    child: Option<Child>,
}

impl FfmpegSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, config: &SinkConfig) -> Result<(), EngineError> {
        let child = Command::new("ffmpeg")
            .arg("-y")
            .args(["-loglevel", "error"])
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", config.width, config.height)])
            .args(["-r", &config.fps.to_string()])
            .args(["-i", "-"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(&config.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| EngineError::EncodingFailed(format!("failed to spawn ffmpeg: {e}")))?;
        self.child = Some(child);
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), EngineError> {
        let child = self
            .child
            .as_mut()
            .ok_or_else(|| EngineError::EncodingFailed("no active ffmpeg session".to_string()))?;
        let stdin = child
            .stdin
            .as_mut()
            .ok_or_else(|| EngineError::EncodingFailed("ffmpeg stdin closed".to_string()))?;
        stdin
            .write_all(frame.data())
            .map_err(|e| EngineError::EncodingFailed(format!("ffmpeg pipe write: {e}")))
    }

    fn finalize(&mut self) -> Result<(), EngineError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // Closing stdin signals end of stream; ffmpeg then writes the
        // container trailer and exits.
        drop(child.stdin.take());
        let status = child
            .wait()
            .map_err(|e| EngineError::EncodingFailed(format!("waiting for ffmpeg: {e}")))?;
        if !status.success() {
            return Err(EngineError::EncodingFailed(format!(
                "ffmpeg exited with {status}"
            )));
        }
        Ok(())
    }
}

// ── raw file sink ─────────────────────────────────────────────────────────

/// Writes frames as a headerless raw RGBA stream.
///
/// Useful for tests and debugging without an encoder installed; the
/// result plays back with
/// `ffplay -f rawvideo -pix_fmt rgba -s WxH -framerate FPS <path>`.
#[derive(Debug, Default)]
pub struct RawSink {
    file: Option<BufWriter<File>>,
}

impl RawSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for RawSink {
    fn begin(&mut self, config: &SinkConfig) -> Result<(), EngineError> {
        let file = File::create(&config.path)
            .map_err(|e| EngineError::EncodingFailed(format!("create {:?}: {e}", config.path)))?;
        self.file = Some(BufWriter::new(file));
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), EngineError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| EngineError::EncodingFailed("no active raw session".to_string()))?;
        file.write_all(frame.data())
            .map_err(|e| EngineError::EncodingFailed(format!("raw write: {e}")))
    }

    fn finalize(&mut self) -> Result<(), EngineError> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .map_err(|e| EngineError::EncodingFailed(format!("raw flush: {e}")))?;
        }
        Ok(())
    }
}

// ── in-memory sink ────────────────────────────────────────────────────────

/// What a [`MemorySink`] has observed so far.
#[derive(Debug, Default)]
pub struct Captured {
    pub frames: Vec<Frame>,
    pub began: u32,
    pub finalized: u32,
}

/// Captures frames in memory. The shared handle stays valid after the
/// sink itself has been consumed by a recorder, so tests can inspect the
/// stream post-session.
#[derive(Debug, Default)]
pub struct MemorySink {
    shared: Arc<Mutex<Captured>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Arc<Mutex<Captured>> {
        Arc::clone(&self.shared)
    }
}

impl FrameSink for MemorySink {
    fn begin(&mut self, _config: &SinkConfig) -> Result<(), EngineError> {
        self.shared.lock().unwrap().began += 1;
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), EngineError> {
        self.shared.lock().unwrap().frames.push(frame.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), EngineError> {
        self.shared.lock().unwrap().finalized += 1;
        Ok(())
    }
}
