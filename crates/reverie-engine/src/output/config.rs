use crate::error::EngineError;
use crate::time::DEFAULT_FPS;

/// Camera/output state: resolution and frame rate.
///
/// One explicit object owned by the stage. Engine start creates it,
/// process end tears it down, and nothing else holds ambient output
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    width: u32,
    height: u32,
    fps: u32,
}

impl OutputConfig {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidResolution { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_fps(&mut self, fps: u32) -> Result<(), EngineError> {
        if fps == 0 {
            return Err(EngineError::InvalidDimension {
                name: "fps",
                value: 0.0,
            });
        }
        self.fps = fps;
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: DEFAULT_FPS,
        }
    }
}
