use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::foundation::core::Raster;
use crate::foundation::error::{FryError, FryResult};
use crate::foundation::math::mul_div255_u8;

/// Default JPEG quality.
pub const JPEG_QUALITY: u8 = 90;

/// File name stem used for every export.
pub const EXPORT_FILE_STEM: &str = "deep-fried";

/// Compressed output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Baseline JPEG; alpha is flattened over black.
    Jpeg {
        /// Encoder quality, 1..=100.
        quality: u8,
    },
    /// Lossless PNG, alpha kept.
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Jpeg {
            quality: JPEG_QUALITY,
        }
    }
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "jpg",
            ExportFormat::Png => "png",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }

    /// The fixed export file name for this format.
    pub fn file_name(self) -> String {
        format!("{EXPORT_FILE_STEM}.{}", self.extension())
    }
}

/// Export configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOpts {
    /// Output format.
    pub format: ExportFormat,
}

/// An encoded image ready to be written or handed to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    /// Suggested file name (`deep-fried.jpg` / `deep-fried.png`).
    pub file_name: String,
    /// Format of `bytes`.
    pub format: ExportFormat,
    /// Encoded width.
    pub width: u32,
    /// Encoded height.
    pub height: u32,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// Write into `dir` under [`ExportedImage::file_name`]; returns the full path.
    pub fn write_to(&self, dir: &Path) -> FryResult<PathBuf> {
        let path = dir.join(&self.file_name);
        self.write_file(&path)?;
        Ok(path)
    }

    /// Write to an explicit path.
    pub fn write_file(&self, path: &Path) -> FryResult<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write export {}", path.display()))?;
        Ok(())
    }
}

/// Why an export produced nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportNotice {
    /// No source image is loaded.
    NoImage,
    /// The output surface has zero width or height.
    EmptySurface,
}

impl fmt::Display for ExportNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportNotice::NoImage => f.write_str("no image loaded"),
            ExportNotice::EmptySurface => f.write_str("output surface has zero area"),
        }
    }
}

/// Result of an export request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The surface was encoded.
    Encoded(ExportedImage),
    /// Nothing was produced.
    Skipped(ExportNotice),
}

impl ExportOutcome {
    /// The encoded image, if any.
    pub fn encoded(&self) -> Option<&ExportedImage> {
        match self {
            ExportOutcome::Encoded(img) => Some(img),
            ExportOutcome::Skipped(_) => None,
        }
    }
}

/// Encode `surface` with `opts`. A zero-area surface is skipped with a warning.
#[tracing::instrument(level = "debug", skip(surface), fields(w = surface.width(), h = surface.height()))]
pub fn export_surface(surface: &Raster, opts: ExportOpts) -> FryResult<ExportOutcome> {
    if surface.is_empty() {
        tracing::warn!(
            w = surface.width(),
            h = surface.height(),
            "export skipped: {}",
            ExportNotice::EmptySurface
        );
        return Ok(ExportOutcome::Skipped(ExportNotice::EmptySurface));
    }

    let bytes = encode_surface(surface, opts.format)?;
    tracing::debug!(bytes = bytes.len(), format = ?opts.format, "encoded output surface");
    Ok(ExportOutcome::Encoded(ExportedImage {
        file_name: opts.format.file_name(),
        format: opts.format,
        width: surface.width(),
        height: surface.height(),
        bytes,
    }))
}

pub(crate) fn encode_surface(surface: &Raster, format: ExportFormat) -> FryResult<Vec<u8>> {
    let (w, h) = surface.dims();
    let mut out = Vec::new();
    match format {
        ExportFormat::Jpeg { quality } => {
            let rgb = flatten_over_black(surface.data());
            JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .encode(&rgb, w, h, ExtendedColorType::Rgb8)
                .map_err(|e| FryError::encode(format!("jpeg: {e}")))?;
        }
        ExportFormat::Png => {
            PngEncoder::new(&mut out)
                .write_image(surface.data(), w, h, ExtendedColorType::Rgba8)
                .map_err(|e| FryError::encode(format!("png: {e}")))?;
        }
    }
    Ok(out)
}

fn flatten_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = u16::from(px[3]);
        rgb.extend_from_slice(&[
            mul_div255_u8(u16::from(px[0]), a),
            mul_div255_u8(u16::from(px[1]), a),
            mul_div255_u8(u16::from(px[2]), a),
        ]);
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
