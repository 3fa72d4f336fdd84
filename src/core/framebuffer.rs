use crate::core::color::to_rgba8;
use nalgebra::Vector4;

/// Colour and depth storage for one render target.
///
/// The colour buffer holds `width * height * 4` RGBA bytes, indexed
/// `(y * width + x) * 4 + channel`. The depth buffer holds `width * height` values
/// indexed `y * width + x`; `f64::INFINITY` marks a pixel nothing has been drawn to.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<u8>,
    depth_buffer: Vec<f64>,
}

/// An owned snapshot of the colour buffer, ready for display or encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size * 4],
            depth_buffer: vec![f64::INFINITY; size],
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Fills every pixel with `clear_color` and resets every depth entry to infinity.
    pub fn clear(&mut self, clear_color: &Vector4<f64>) {
        let rgba = to_rgba8(clear_color);
        for pixel in self.color_buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
        self.depth_buffer.fill(f64::INFINITY);
    }

    /// Depth-tested pixel write.
    ///
    /// Coordinates are floored first. Returns `false` without touching either buffer if
    /// the pixel is outside the target or `depth` is not strictly less than the stored
    /// depth (ties keep the earlier write).
    pub fn set_pixel(&mut self, x: f64, y: f64, color: &Vector4<f64>, depth: f64) -> bool {
        let ix = x.floor();
        let iy = y.floor();

        if !(ix >= 0.0 && iy >= 0.0 && ix < self.width as f64 && iy < self.height as f64) {
            return false;
        }

        let idx = self.index(ix as usize, iy as usize);
        // Written as a negated `<` so NaN depths are rejected too.
        if !(depth < self.depth_buffer[idx]) {
            return false;
        }

        self.depth_buffer[idx] = depth;
        self.color_buffer[idx * 4..idx * 4 + 4].copy_from_slice(&to_rgba8(color));
        true
    }

    /// Copies the colour buffer out. Later writes to the framebuffer never reach the copy.
    pub fn image_data(&self) -> ImageData {
        ImageData {
            width: self.width,
            height: self.height,
            data: self.color_buffer.clone(),
        }
    }

    pub fn color_buffer(&self) -> &[u8] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth_buffer
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.color_buffer[idx..idx + 4]);
        Some(rgba)
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }
}
