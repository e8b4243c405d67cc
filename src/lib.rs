//! deepfry is a real-time "deep-fry" image stylizer.
//!
//! A [`FrySession`] holds one source image and a [`ParameterSet`]. Parameter edits become render
//! requests that a [`RenderScheduler`] coalesces into at most one frame per display refresh; while
//! a control is being dragged, frames run on a reduced preview buffer and skip the expensive passes.
//! Each frame runs a CPU pipeline:
//!
//! - color grade (brightness, contrast, saturation, hue)
//! - tonal burn (exposure, extra gain, burn, posterize, noise)
//! - bloom
//! - overlays (vignette, film burn, scanlines, chromatic aberration, warm edge burn)
//!
//! The output surface can then be exported as JPEG or PNG.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Image input.
pub mod assets;
pub(crate) mod effects;
/// Output encoding.
pub mod encode;
mod foundation;
mod params;
pub(crate) mod passes;
/// Frame scheduling and the render pipeline.
pub mod render;
/// Session-oriented API.
pub mod session;

pub use crate::foundation::core::{
    MAX_OUTPUT_SIDE, OutputGeometry, PREVIEW_SCALE, Raster, Rgba8, SourceImage,
};
pub use crate::foundation::error::{FryError, FryResult};

pub use crate::assets::decode::{decode_image, load_image_file};
pub use crate::assets::demo::demo_image;
pub use crate::effects::overlay::{Overlay, plan_overlays};
pub use crate::encode::export::{
    ExportFormat, ExportNotice, ExportOpts, ExportOutcome, ExportedImage, export_surface,
};
pub use crate::params::model::{Param, ParamRange, ParameterSet};
pub use crate::params::preset::{Preset, PresetBundle};
pub use crate::render::pipeline::FrameReport;
pub use crate::render::pool::{BufferPoolOpts, BufferPoolStats};
pub use crate::render::scheduler::{
    FrameClock, FrameTicket, RenderQuality, RenderScheduler, SchedulerStats, SteppedClock,
};
pub use crate::session::fry_session::{FrySession, SessionOpts};
