use crate::error::EngineError;
use crate::render::Frame;

use super::sink::{FrameSink, SinkConfig};

/// One scoped encoding session.
///
/// Owns the sink (and through it the encoder handle) exclusively for the
/// session's lifetime. Frames are streamed to the sink on every submit, so
/// a session that is never finalized explicitly still has all frames
/// flushed; [`Drop`] writes the trailer as a last resort, guaranteeing the
/// handle is released exactly once on every exit path.
pub struct Recorder {
    sink: Box<dyn FrameSink>,
    open: bool,
    frames: u64,
}

impl Recorder {
    /// Opens the session by handing the sink its configuration.
    pub fn begin(mut sink: Box<dyn FrameSink>, config: &SinkConfig) -> Result<Self, EngineError> {
        sink.begin(config)?;
        log::info!(
            "recording session started: {} ({}x{} @ {} fps)",
            config.path.display(),
            config.width,
            config.height,
            config.fps
        );
        Ok(Self {
            sink,
            open: true,
            frames: 0,
        })
    }

    /// Appends one frame; submission order is playback order.
    pub fn submit(&mut self, frame: &Frame) -> Result<(), EngineError> {
        if !self.open {
            return Err(EngineError::EncodingFailed(
                "submit after finalize".to_string(),
            ));
        }
        self.sink.submit(frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Flushes and closes the session. Idempotent: the underlying encoder
    /// handle is released exactly once.
    pub fn finalize(&mut self) -> Result<(), EngineError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.sink.finalize()?;
        log::info!("recording session finalized ({} frames)", self.frames);
        Ok(())
    }

    #[inline]
    pub fn frames_submitted(&self) -> u64 {
        self.frames
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        if self.open {
            log::warn!("recorder dropped while open; finalizing");
            if let Err(e) = self.finalize() {
                log::error!("finalize on drop failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::output::sink::MemorySink;
    use crate::paint::Color;

    fn test_config() -> SinkConfig {
        SinkConfig {
            path: PathBuf::from("test.mp4"),
            width: 4,
            height: 4,
            fps: 30,
        }
    }

    fn marked_frame(tag: u8) -> Frame {
        let mut frame = Frame::new(4, 4);
        frame.set(0, 0, Color::new(tag, 0, 0, 255));
        frame
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn submission_order_is_preserved() {
        let sink = MemorySink::new();
        let captured = sink.captured();
        let mut recorder = Recorder::begin(Box::new(sink), &test_config()).unwrap();

        for tag in 0..5u8 {
            recorder.submit(&marked_frame(tag)).unwrap();
        }
        recorder.finalize().unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.frames.len(), 5);
        for (i, frame) in captured.frames.iter().enumerate() {
            assert_eq!(frame.get(0, 0), Some(Color::new(i as u8, 0, 0, 255)));
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn finalize_releases_exactly_once() {
        let sink = MemorySink::new();
        let captured = sink.captured();
        let mut recorder = Recorder::begin(Box::new(sink), &test_config()).unwrap();
        recorder.finalize().unwrap();
        recorder.finalize().unwrap();
        drop(recorder);
        assert_eq!(captured.lock().unwrap().finalized, 1);
    }

    #[test]
    fn drop_finalizes_open_session() {
        let sink = MemorySink::new();
        let captured = sink.captured();
        {
            let mut recorder = Recorder::begin(Box::new(sink), &test_config()).unwrap();
            recorder.submit(&marked_frame(1)).unwrap();
        }
        let captured = captured.lock().unwrap();
        assert_eq!(captured.finalized, 1);
        assert_eq!(captured.frames.len(), 1);
    }

    #[test]
    fn submit_after_finalize_fails() {
        let mut recorder =
            Recorder::begin(Box::new(MemorySink::new()), &test_config()).unwrap();
        recorder.finalize().unwrap();
        assert!(matches!(
            recorder.submit(&marked_frame(0)),
            Err(EngineError::EncodingFailed(_))
        ));
    }
}
