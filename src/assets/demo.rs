use crate::assets::decode::{rasterize_svg, svg_options};
use crate::foundation::core::SourceImage;
use crate::foundation::error::{FryError, FryResult};

/// Demo image width.
pub const DEMO_WIDTH: u32 = 640;
/// Demo image height.
pub const DEMO_HEIGHT: u32 = 800;

const DEMO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="800" viewBox="0 0 640 800">
  <defs>
    <linearGradient id="sky" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="#ff9a3c"/>
      <stop offset="0.5" stop-color="#ff3c7a"/>
      <stop offset="1" stop-color="#3c5aff"/>
    </linearGradient>
    <radialGradient id="sun" cx="0.5" cy="0.4" r="0.35">
      <stop offset="0" stop-color="#fff6c8" stop-opacity="0.9"/>
      <stop offset="1" stop-color="#fff6c8" stop-opacity="0"/>
    </radialGradient>
  </defs>
  <rect width="640" height="800" fill="url(#sky)"/>
  <rect width="640" height="800" fill="url(#sun)"/>
  <text x="320" y="380" text-anchor="middle" font-family="sans-serif" font-weight="bold"
        font-size="88" fill="#ffffff">DEEP</text>
  <text x="320" y="480" text-anchor="middle" font-family="sans-serif" font-weight="bold"
        font-size="88" fill="#ffffff">FRIED</text>
  <text x="320" y="560" text-anchor="middle" font-family="sans-serif"
        font-size="28" fill="#1a1a1a">drop an image to start</text>
</svg>"##;

/// Render the built-in 640x800 gradient with overlaid text.
///
/// Text uses whatever sans-serif face the system font database provides; without one the
/// gradient is still produced.
pub fn demo_image() -> FryResult<SourceImage> {
    let tree = usvg::Tree::from_data(DEMO_SVG.as_bytes(), &svg_options())
        .map_err(|e| FryError::evaluation(format!("demo svg: {e}")))?;
    let raster = rasterize_svg(&tree)?;
    tracing::debug!(w = raster.width(), h = raster.height(), "generated demo image");
    Ok(SourceImage::new(raster))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/demo.rs"]
mod tests;
