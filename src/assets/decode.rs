use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{Raster, SourceImage};
use crate::foundation::error::{FryError, FryResult};

// Refuse to rasterize absurd SVG canvases.
const MAX_SVG_SIDE: u32 = 8192;

/// Decode encoded image bytes (any format the `image` crate reads, or SVG) into straight RGBA8.
///
/// Fails with [`FryError::Decode`]; nothing is produced on failure.
pub fn decode_image(bytes: &[u8]) -> FryResult<SourceImage> {
    if bytes.is_empty() {
        return Err(FryError::decode("empty input"));
    }
    if looks_like_svg(bytes) {
        let opts = svg_options();
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| FryError::decode(format!("parse svg: {e}")))?;
        return rasterize_svg(&tree).map(SourceImage::new);
    }

    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| FryError::decode(format!("{e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> FryResult<SourceImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    decode_image(&bytes)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// `usvg` options backed by the system font database.
pub(crate) fn svg_options() -> usvg::Options<'static> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    }
}

/// Rasterize an SVG tree at its intrinsic size into straight-alpha RGBA8.
pub(crate) fn rasterize_svg(tree: &usvg::Tree) -> FryResult<Raster> {
    let size = tree.size();
    let to_px = |v: f32| -> FryResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(FryError::decode("svg has invalid width/height"));
        }
        let px = v.ceil() as u32;
        if px > MAX_SVG_SIDE {
            return Err(FryError::decode(format!(
                "svg side {px} exceeds {MAX_SVG_SIDE}"
            )));
        }
        Ok(px.max(1))
    };
    let (w, h) = (to_px(size.width())?, to_px(size.height())?);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| FryError::evaluation("failed to allocate svg pixmap"))?;
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Raster::from_rgba8(w, h, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
