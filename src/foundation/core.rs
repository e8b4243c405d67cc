use std::sync::Arc;

use crate::foundation::error::{FryError, FryResult};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Longest output side, in pixels, before the source is scaled down.
pub const MAX_OUTPUT_SIDE: u32 = 1600;

/// Linear scale applied to the output geometry while the user is scrubbing.
pub const PREVIEW_SCALE: f64 = 0.35;

/// Owned RGBA8 raster: straight alpha, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Allocate a transparent-black raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; pixel_bytes(width, height)],
        }
    }

    /// Allocate a raster where every pixel is `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> Self {
        Self {
            width,
            height,
            data: px.repeat(pixel_count(width, height)),
        }
    }

    /// Wrap existing RGBA8 bytes; the length must match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> FryResult<Self> {
        let expected = checked_byte_len(width, height)?;
        if data.len() != expected {
            return Err(FryError::validation(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Resize in place, keeping the allocation when possible. Contents are unspecified afterwards.
    pub(crate) fn reshape(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.resize(pixel_bytes(width, height), 0);
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// Immutable decoded input image. Cloning is cheap; the pixels are shared.
#[derive(Clone, Debug)]
pub struct SourceImage {
    raster: Arc<Raster>,
}

impl SourceImage {
    /// Freeze a raster as a source image.
    pub fn new(raster: Raster) -> Self {
        Self {
            raster: Arc::new(raster),
        }
    }

    /// Build a source image from straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> FryResult<Self> {
        Raster::from_rgba8(width, height, data).map(Self::new)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// The underlying pixels.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}

/// Output surface size derived from the source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputGeometry {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl OutputGeometry {
    /// Fit `src_w x src_h` so that the longer side is at most `max_side`, preserving aspect ratio.
    pub fn fit(src_w: u32, src_h: u32, max_side: u32) -> Self {
        let longest = src_w.max(src_h);
        if src_w == 0 || src_h == 0 || max_side == 0 {
            return Self::default();
        }
        let s = (f64::from(max_side) / f64::from(longest)).min(1.0);
        Self {
            width: (f64::from(src_w) * s).round() as u32,
            height: (f64::from(src_h) * s).round() as u32,
        }
    }

    /// Geometry for a source image using [`MAX_OUTPUT_SIDE`].
    pub fn for_source(src: &SourceImage) -> Self {
        Self::fit(src.width(), src.height(), MAX_OUTPUT_SIDE)
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Working size at a linear `scale`, rounded down and never smaller than 1x1.
    pub fn scaled(&self, scale: f64) -> (u32, u32) {
        let scale = if scale.is_finite() {
            scale.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let w = (f64::from(self.width) * scale + 1e-9).floor() as u32;
        let h = (f64::from(self.height) * scale + 1e-9).floor() as u32;
        (w.max(1), h.max(1))
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize)
}

pub(crate) fn pixel_bytes(width: u32, height: u32) -> usize {
    pixel_count(width, height).saturating_mul(4)
}

pub(crate) fn checked_byte_len(width: u32, height: u32) -> FryResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FryError::validation("raster size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
