//! Bridge between the stage and the per-pixel kernel DSL.
//!
//! Registration compiles the procedural description once; the returned
//! handle re-evaluates the kernel for every animation step, bypassing the
//! scene rasterizer entirely (a kernel paints the whole frame).

use reverie_kernel::{CompileError, CoordSpace, Kernel, KernelProgram, compile};

use crate::error::EngineError;
use crate::render::Frame;
use crate::stage::Stage;
use crate::time::interpolate;

/// A registered kernel, ready to drive frames.
pub struct KernelHandle {
    kernel: Kernel,
    space: CoordSpace,
}

impl KernelHandle {
    /// Replaces the default normalized `[0, 1]²` coordinate space.
    pub fn with_space(mut self, space: CoordSpace) -> Self {
        self.space = space;
        self
    }

    #[inline]
    pub fn iteration_bound(&self) -> u32 {
        self.kernel.iteration_bound()
    }

    /// Evaluates one frame at the given resolution without touching the
    /// stage. Useful for snapshots and tests.
    pub fn frame(&self, width: u32, height: u32) -> Frame {
        Frame::from_pixels(width, height, self.kernel.run_with(self.space, width, height))
    }

    /// Drives the stage for `duration` seconds, evaluating the kernel once
    /// per step and delivering the result like any rendered frame (it is
    /// captured when a recording session is armed).
    pub fn run(&self, stage: &mut Stage, duration: f32) -> Result<(), EngineError> {
        let (width, height) = (stage.output().width(), stage.output().height());
        for _ in interpolate(duration, stage.output().fps()) {
            let pixels = self.kernel.run_with(self.space, width, height);
            stage.deliver(Frame::from_pixels(width, height, pixels))?;
        }
        Ok(())
    }
}

impl Stage {
    /// Compiles a kernel description into a runnable handle.
    pub fn register_kernel(&self, program: &KernelProgram) -> Result<KernelHandle, CompileError> {
        Ok(KernelHandle {
            kernel: compile(program)?,
            space: CoordSpace::UNIT,
        })
    }
}

#[cfg(test)]
mod tests {
    use reverie_kernel::ast::{
        KernelProgram, Loop, OutputMap, Stmt, call, coord, lt, scalar, var,
    };

    use super::*;
    use crate::output::MemorySink;
    use crate::paint::Color;

    /// White disc of the given radius around the space's center.
    fn disc(radius: f32) -> KernelProgram {
        KernelProgram {
            constants: vec![(
                "center".to_string(),
                reverie_kernel::ast::ConstValue::Vec2(0.5, 0.5),
            )],
            setup: vec![Stmt::Let(
                "d".to_string(),
                call("dist", vec![coord(), var("center")]),
            )],
            iterate: Some(Loop {
                count: scalar(1.0),
                body: vec![],
                break_when: Some(lt(var("d"), scalar(radius))),
            }),
            output: OutputMap::Select {
                escaped: [255, 255, 255, 255],
                interior: [0, 0, 0, 255],
            },
        }
    }

    #[test]
    fn run_captures_one_kernel_frame_per_step() {
        let mut stage = Stage::new();
        stage.set_resolution(16, 16).unwrap();
        let sink = MemorySink::new();
        let captured = sink.captured();
        stage.record_with_sink("kernel.mp4", Box::new(sink)).unwrap();

        let handle = stage.register_kernel(&disc(0.25)).unwrap();
        handle.run(&mut stage, 0.2).unwrap();
        stage.stop().unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.frames.len(), 6);
        // A kernel is a pure function of the coordinate, so every step
        // produced the identical frame.
        assert!(captured.frames.iter().all(|f| *f == captured.frames[0]));
        assert_eq!(captured.frames[0].get(8, 8), Some(Color::WHITE));
        assert_eq!(captured.frames[0].get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn frame_matches_direct_execution() {
        let stage = Stage::new();
        let handle = stage.register_kernel(&disc(0.4)).unwrap();
        let a = handle.frame(8, 8);
        let b = handle.frame(8, 8);
        assert_eq!(a, b);
        assert_eq!(a.width(), 8);
    }
}
