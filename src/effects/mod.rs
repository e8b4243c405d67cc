//! Compositing effects applied after the per-pixel passes.

pub(crate) mod blend;
pub(crate) mod bloom;
pub(crate) mod blur;
pub(crate) mod gradient;
/// Post-pixel overlays (vignette, film burn, scanlines, chromatic aberration, warm edge burn).
pub mod overlay;
