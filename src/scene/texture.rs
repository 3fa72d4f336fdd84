use crate::core::color::{from_rgba8, to_rgba8};
use crate::error::RenderError;
use log::info;
use nalgebra::Vector4;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// How texture coordinates outside [0, 1] are mapped back into the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Keep the fractional part, so the image tiles.
    ///
    /// Tiling is exact only up to f64 rounding: `u` and `u + 1.0` can pick
    /// neighbouring texels when `fract(u) * (width - 1)` lies within an ulp or
    /// so of a whole number.
    #[default]
    Repeat,
    /// Pin to the nearest edge.
    Clamp,
}

impl WrapMode {
    #[inline]
    fn apply(self, value: f64) -> f64 {
        match self {
            WrapMode::Repeat => ((value % 1.0) + 1.0) % 1.0,
            WrapMode::Clamp => value.clamp(0.0, 1.0),
        }
    }
}

/// An immutable RGBA8 image, row 0 at the top.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    data: Arc<[u8]>,
}

impl Texture {
    /// Wraps raw RGBA bytes. Fails unless both sides are non-zero and
    /// `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Validation(format!(
                "Texture dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::Validation(format!(
                "Texture data has {} bytes, expected {} for {}x{} RGBA",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data: data.into(),
        })
    }

    /// A `size x size` texture of a single colour (size 0 is treated as 1).
    pub fn solid(color: &Vector4<f64>, size: u32) -> Self {
        let size = size.max(1);
        let rgba = to_rgba8(color);
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(size as usize * size as usize * 4)
            .collect();
        Self {
            width: size,
            height: size,
            data: data.into(),
        }
    }

    /// Decodes an image file into RGBA8.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|e| {
                RenderError::Load(format!("Failed to load texture {:?}: {}", path_ref, e))
            })?
            .to_rgba8();

        let (width, height) = img.dimensions();
        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Self::new(width, height, img.into_raw())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Nearest-neighbour lookup. Returns RGBA with channels in [0, 1].
    ///
    /// `v` is flipped (v = 1 is image row 0). Indices are `floor(u * (width - 1))` and
    /// `floor((1 - v) * (height - 1))`, clamped to the image.
    pub fn sample(&self, u: f64, v: f64, wrap_mode: WrapMode) -> Vector4<f64> {
        let u = wrap_mode.apply(u);
        let v = wrap_mode.apply(v);

        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        let px = ((u * max_x as f64).floor() as i64).clamp(0, max_x);
        let py = (((1.0 - v) * max_y as f64).floor() as i64).clamp(0, max_y);

        let idx = (py as usize * self.width as usize + px as usize) * 4;
        from_rgba8(&self.data[idx..idx + 4])
    }
}
