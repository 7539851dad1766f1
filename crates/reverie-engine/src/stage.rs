use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::output::{FfmpegSink, FrameSink, OutputConfig, Recorder, SinkConfig};
use crate::render::{CpuRasterizer, Frame, Rasterizer};
use crate::scene::Scene;
use crate::time::{Step, interpolate};

/// Output path used by `record_default()`.
pub const DEFAULT_OUTPUT_PATH: &str = "video.mp4";

/// The engine's root object: scene, output configuration, rasterizer, and
/// the current recording session.
///
/// Everything is single-threaded and cooperative. [`Stage::animate`] runs
/// one step to completion (mutation → render → capture) before the next
/// step's body observes anything, so step `i + 1` always sees the fully
/// settled state from step `i`.
pub struct Stage {
    scene: Scene,
    output: OutputConfig,
    rasterizer: Box<dyn Rasterizer>,
    recorder: Option<Recorder>,
    last_frame: Option<Frame>,
    age: f32,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            output: OutputConfig::default(),
            rasterizer: Box::new(CpuRasterizer::new()),
            recorder: None,
            last_frame: None,
            age: 0.0,
        }
    }

    /// Swaps in a different rasterizer implementation.
    pub fn with_rasterizer(mut self, rasterizer: Box<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    // ── scene and output state ────────────────────────────────────────────

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Total simulated seconds captured so far. Informational only; step
    /// timestamps come from [`interpolate`], not from this accumulator.
    #[inline]
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Changes the output resolution.
    ///
    /// Fails with `InvalidResolution` for zero dimensions and with
    /// `AlreadyRecording` while a session is armed; the encoder was
    /// opened with the old dimensions and cannot resize mid-stream.
    pub fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        if self.recorder.is_some() {
            return Err(EngineError::AlreadyRecording);
        }
        self.output.set_resolution(width, height)
    }

    /// Changes the output frame rate; same session restrictions as
    /// [`Stage::set_resolution`].
    pub fn set_fps(&mut self, fps: u32) -> Result<(), EngineError> {
        if self.recorder.is_some() {
            return Err(EngineError::AlreadyRecording);
        }
        self.output.set_fps(fps)
    }

    // ── recording lifecycle ───────────────────────────────────────────────

    #[inline]
    pub fn recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Arms a recording session encoding to `path` via the system ffmpeg.
    pub fn record(&mut self, path: impl Into<PathBuf>) -> Result<(), EngineError> {
        self.record_with_sink(path, Box::new(FfmpegSink::new()))
    }

    /// [`Stage::record`] with the default output path.
    pub fn record_default(&mut self) -> Result<(), EngineError> {
        self.record(DEFAULT_OUTPUT_PATH)
    }

    /// Arms a recording session with a caller-provided sink.
    ///
    /// Fails with `AlreadyRecording` if a session is armed; exactly one
    /// output artifact exists per session.
    pub fn record_with_sink(
        &mut self,
        path: impl Into<PathBuf>,
        sink: Box<dyn FrameSink>,
    ) -> Result<(), EngineError> {
        if self.recorder.is_some() {
            return Err(EngineError::AlreadyRecording);
        }
        let config = SinkConfig {
            path: path.into(),
            width: self.output.width(),
            height: self.output.height(),
            fps: self.output.fps(),
        };
        self.recorder = Some(Recorder::begin(sink, &config)?);
        Ok(())
    }

    /// Finalizes the current session.
    ///
    /// Idempotent: calling `stop()` while not recording is a no-op, not an
    /// error. Called from inside an [`Stage::animate`] step body it disarms
    /// capture immediately, so the frame rendered for that same step is
    /// not submitted. That boundary is deterministic, not racy.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        match self.recorder.take() {
            None => {
                log::debug!("stop() while idle; ignoring");
                Ok(())
            }
            Some(mut recorder) => recorder.finalize(),
        }
    }

    // ── the animation loop ────────────────────────────────────────────────

    /// Runs the cooperative stepping loop for `duration` seconds.
    ///
    /// For each of the `ceil(duration * fps)` steps:
    /// 1. the caller's body runs and may mutate any node (or this stage),
    /// 2. one frame is rendered from the settled scene state,
    /// 3. the frame is submitted to the recorder if a session is armed.
    ///
    /// The scheduler never finalizes the recorder: even when the loop
    /// ends with a session still armed, only [`Stage::stop`] writes the
    /// trailer. Scheduler and recorder lifecycles stay decoupled.
    pub fn animate<F>(&mut self, duration: f32, mut body: F) -> Result<(), EngineError>
    where
        F: FnMut(&mut Stage, Step),
    {
        let steps = interpolate(duration, self.output.fps());
        log::debug!("animating {} steps", steps.total());
        for step in steps {
            body(&mut *self, step);
            self.capture_step()?;
        }
        Ok(())
    }

    /// Holds the picture for `t` seconds: the last rendered frame (or the
    /// current scene, if nothing has rendered yet) is re-submitted once
    /// per step.
    pub fn wait(&mut self, t: f32) -> Result<(), EngineError> {
        let frame = match &self.last_frame {
            Some(frame) => frame.clone(),
            None => self.render_scene(),
        };
        for _ in interpolate(t, self.output.fps()) {
            self.deliver(frame.clone())?;
        }
        Ok(())
    }

    /// Renders the current scene once and writes it as a PNG.
    pub fn snapshot(&mut self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        self.render_scene().save_png(path)
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn render_scene(&mut self) -> Frame {
        self.rasterizer
            .rasterize(&self.scene, self.output.width(), self.output.height())
    }

    fn capture_step(&mut self) -> Result<(), EngineError> {
        let frame = self.render_scene();
        self.deliver(frame)
    }

    /// Forwards one finished frame to the recorder (when armed) and keeps
    /// it as the held frame for [`Stage::wait`].
    pub(crate) fn deliver(&mut self, frame: Frame) -> Result<(), EngineError> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.submit(&frame)?;
        }
        self.age += 1.0 / self.output.fps() as f32;
        self.last_frame = Some(frame);
        Ok(())
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::coords::Vec2;
    use crate::output::{Captured, MemorySink, RawSink};
    use crate::paint::Color;

    fn small_stage() -> Stage {
        let mut stage = Stage::new();
        stage.set_resolution(8, 8).unwrap();
        stage
    }

    fn armed_stage() -> (Stage, Arc<Mutex<Captured>>) {
        let mut stage = small_stage();
        let sink = MemorySink::new();
        let captured = sink.captured();
        stage.record_with_sink("test.mp4", Box::new(sink)).unwrap();
        (stage, captured)
    }

    // ── recording lifecycle ───────────────────────────────────────────────

    #[test]
    fn record_arms_and_stop_disarms() {
        let (mut stage, captured) = armed_stage();
        assert!(stage.recording());
        stage.stop().unwrap();
        assert!(!stage.recording());
        assert_eq!(captured.lock().unwrap().finalized, 1);
    }

    #[test]
    fn nested_record_fails() {
        let (mut stage, _captured) = armed_stage();
        assert_eq!(
            stage.record_with_sink("other.mp4", Box::new(MemorySink::new())),
            Err(EngineError::AlreadyRecording)
        );
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut stage, captured) = armed_stage();
        stage.stop().unwrap();
        stage.stop().unwrap();
        stage.stop().unwrap();
        assert!(!stage.recording());
        assert_eq!(captured.lock().unwrap().finalized, 1);
    }

    #[test]
    fn stop_without_record_is_a_noop() {
        let mut stage = small_stage();
        assert_eq!(stage.stop(), Ok(()));
        assert!(!stage.recording());
    }

    #[test]
    fn record_then_stop_toggles_file_existence() {
        let path = std::env::temp_dir().join("reverie-stage-record-test.raw");
        let _ = std::fs::remove_file(&path);
        assert!(!path.exists());

        let mut stage = small_stage();
        stage
            .record_with_sink(path.clone(), Box::new(RawSink::new()))
            .unwrap();
        assert!(stage.recording());
        stage.animate(0.1, |_, _| {}).unwrap();
        stage.stop().unwrap();

        assert!(!stage.recording());
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn resolution_is_locked_while_recording() {
        let (mut stage, _captured) = armed_stage();
        assert_eq!(
            stage.set_resolution(16, 16),
            Err(EngineError::AlreadyRecording)
        );
        stage.stop().unwrap();
        stage.set_resolution(16, 16).unwrap();
    }

    // ── the stepping loop ─────────────────────────────────────────────────

    #[test]
    fn animate_captures_one_frame_per_step() {
        let (mut stage, captured) = armed_stage();
        stage.animate(5.0, |_, _| {}).unwrap();
        assert_eq!(captured.lock().unwrap().frames.len(), 150);
    }

    #[test]
    fn loop_end_does_not_finalize_the_session() {
        let (mut stage, captured) = armed_stage();
        stage.animate(0.1, |_, _| {}).unwrap();
        assert!(stage.recording());
        assert_eq!(captured.lock().unwrap().finalized, 0);
        stage.stop().unwrap();
        assert_eq!(captured.lock().unwrap().finalized, 1);
    }

    #[test]
    fn stop_inside_a_step_body_skips_that_frame() {
        let (mut stage, captured) = armed_stage();
        // 3 steps at 30 fps; stop during the second body.
        stage
            .animate(0.1, |stage, step| {
                if step.index == 1 {
                    stage.stop().unwrap();
                }
            })
            .unwrap();
        // Step 0 was submitted; step 1's frame was rendered after the stop
        // and therefore dropped, as was step 2's.
        assert_eq!(captured.lock().unwrap().frames.len(), 1);
    }

    #[test]
    fn steps_observe_previously_settled_state() {
        let mut stage = small_stage();
        let id = stage
            .scene_mut()
            .add_circle(1.0, Vec2::zero(), Color::WHITE)
            .unwrap();

        let mut observed = Vec::new();
        stage
            .animate(0.1, |stage, _| {
                let node = &mut stage.scene_mut()[id];
                observed.push(node.position.x);
                node.position.x += 1.0;
            })
            .unwrap();
        assert_eq!(observed, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn wait_repeats_the_held_frame() {
        let (mut stage, captured) = armed_stage();
        stage
            .scene_mut()
            .add_square(4.0, Vec2::zero(), Color::BLUE)
            .unwrap();
        stage.animate(0.03, |_, _| {}).unwrap();
        stage.wait(0.1).unwrap();
        stage.stop().unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.frames.len(), 4);
        assert!(captured.frames.iter().all(|f| *f == captured.frames[0]));
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn hundred_nodes_five_seconds_updates_each_once_per_step() {
        let (mut stage, captured) = armed_stage();
        let mut ids = Vec::new();
        for i in 0..100u32 {
            // Integer-valued coordinates keep the 150 accumulated updates
            // exactly representable for the final equality check.
            let position = Vec2::new((i % 10) as f32, (i / 10) as f32);
            let id = stage
                .scene_mut()
                .add_circle(1.0, position, Color::WHITE)
                .unwrap();
            stage.scene_mut()[id].velocity = Vec2::new(1.0, -1.0);
            ids.push((id, position));
        }

        stage
            .animate(5.0, |stage, _| {
                for node in stage.scene_mut().iter_mut() {
                    let velocity = node.velocity;
                    node.position += velocity;
                }
            })
            .unwrap();
        stage.stop().unwrap();

        assert_eq!(captured.lock().unwrap().frames.len(), 150);
        for (id, start) in ids {
            let node = &stage.scene()[id];
            // One velocity application per step, 150 steps.
            assert_eq!(node.position, start + node.velocity * 150.0);
        }
    }
}
