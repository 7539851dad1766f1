use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::error::EngineError;
use crate::paint::Color;

/// One RGBA8 pixel, layout-compatible with the frame's byte buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for Pixel {
    #[inline]
    fn from(c: Color) -> Self {
        Pixel {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// An immutable-once-rendered pixel buffer for one animation step.
///
/// Row-major, straight-alpha RGBA8, top-left origin. Ownership transfers
/// to the recorder on capture; everything here is plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Allocates an opaque black frame.
    pub fn new(width: u32, height: u32) -> Self {
        let mut frame = Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        };
        frame.clear(Color::BLACK);
        frame
    }

    /// Wraps a kernel executor's pixel mapping as a frame.
    ///
    /// `pixels` must be row-major `width × height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data: bytemuck::cast_vec(pixels),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn clear(&mut self, color: Color) {
        let px: Pixel = color.into();
        for slot in bytemuck::cast_slice_mut::<u8, Pixel>(&mut self.data) {
            *slot = px;
        }
    }

    /// Writes one pixel. Out-of-bounds coordinates are ignored so fill
    /// routines can clip by construction.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some(Color::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Writes the frame as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        image::save_buffer(
            path.as_ref(),
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| EngineError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_opaque_black() {
        let frame = Frame::new(2, 2);
        assert_eq!(frame.get(0, 0), Some(Color::BLACK));
        assert_eq!(frame.data().len(), 16);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut frame = Frame::new(4, 4);
        frame.set(3, 1, Color::BLUE);
        assert_eq!(frame.get(3, 1), Some(Color::BLUE));
        assert_eq!(frame.get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut frame = Frame::new(2, 2);
        frame.set(2, 0, Color::WHITE);
        frame.set(0, 2, Color::WHITE);
        assert!(frame.pixels().iter().all(|p| *p == Pixel::from(Color::BLACK)));
    }

    #[test]
    fn from_pixels_preserves_layout() {
        let frame = Frame::from_pixels(2, 1, vec![[1, 2, 3, 4], [5, 6, 7, 8]]);
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
