use std::path::Path;

use crate::assets::decode::{decode_image, load_image_file};
use crate::assets::demo::demo_image;
use crate::effects::bloom::BLOOM_SCALE;
use crate::encode::export::{ExportNotice, ExportOpts, ExportOutcome, export_surface};
use crate::foundation::core::{MAX_OUTPUT_SIDE, OutputGeometry, PREVIEW_SCALE, Raster, SourceImage};
use crate::foundation::error::FryResult;
use crate::params::model::{Param, ParameterSet};
use crate::params::preset::Preset;
use crate::render::pipeline::{FrameReport, PipelineOpts, RenderPipeline};
use crate::render::pool::{BufferPoolOpts, BufferPoolStats};
use crate::render::scheduler::{
    FrameClock, FrameTicket, RenderQuality, RenderScheduler, SchedulerStats, SteppedClock,
};

/// Options controlling a [`FrySession`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOpts {
    /// Longest output side; larger sources are scaled down.
    pub max_output_side: u32,
    /// Linear working scale while scrubbing.
    pub preview_scale: f64,
    /// Linear scale of the bloom glow buffer.
    pub bloom_scale: f64,
    /// Fixed noise seed. `None` seeds from OS entropy.
    pub noise_seed: Option<u64>,
    /// Working buffer reuse limits.
    pub pool: BufferPoolOpts,
    /// Export format.
    pub export: ExportOpts,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            max_output_side: MAX_OUTPUT_SIDE,
            preview_scale: PREVIEW_SCALE,
            bloom_scale: BLOOM_SCALE,
            noise_seed: None,
            pool: BufferPoolOpts::default(),
            export: ExportOpts::default(),
        }
    }
}

impl SessionOpts {
    /// Defaults with `DEEPFRY_*` environment overrides applied. Unparsable values are ignored.
    ///
    /// - `DEEPFRY_MAX_OUTPUT_SIDE`: positive integer
    /// - `DEEPFRY_PREVIEW_SCALE`: float in `(0, 1]`
    /// - `DEEPFRY_POOL_MAX_BYTES`: integer, `0` disables retention
    /// - `DEEPFRY_NOISE_SEED`: u64
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = env_parse::<u32>("DEEPFRY_MAX_OUTPUT_SIDE").filter(|&n| n > 0) {
            opts.max_output_side = n;
        }
        if let Some(s) =
            env_parse::<f64>("DEEPFRY_PREVIEW_SCALE").filter(|s| s.is_finite() && *s > 0.0 && *s <= 1.0)
        {
            opts.preview_scale = s;
        }
        if let Some(b) = env_parse::<usize>("DEEPFRY_POOL_MAX_BYTES") {
            opts.pool.max_pool_bytes = b;
        }
        if let Some(seed) = env_parse::<u64>("DEEPFRY_NOISE_SEED") {
            opts.noise_seed = Some(seed);
        }
        opts
    }

    fn pipeline_opts(&self) -> PipelineOpts {
        PipelineOpts {
            preview_scale: self.preview_scale,
            bloom_scale: self.bloom_scale,
            noise_seed: self.noise_seed,
            pool: self.pool,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

/// Interactive deep-fry session.
///
/// The host reports parameter edits and scrub edges; the session turns them into render requests,
/// and renders when the host hands back the refresh ticket from its [`FrameClock`]. A fired render
/// always uses the parameter values current at fire time.
pub struct FrySession<C: FrameClock> {
    opts: SessionOpts,
    source: Option<SourceImage>,
    geometry: OutputGeometry,
    params: ParameterSet,
    scheduler: RenderScheduler<C>,
    pipeline: RenderPipeline,
    last_report: Option<FrameReport>,
}

impl<C: FrameClock> FrySession<C> {
    /// Empty session (no image, default parameters) driven by `clock`.
    pub fn new(clock: C, opts: SessionOpts) -> Self {
        Self {
            pipeline: RenderPipeline::new(opts.pipeline_opts()),
            opts,
            source: None,
            geometry: OutputGeometry::default(),
            params: ParameterSet::default(),
            scheduler: RenderScheduler::new(clock),
            last_report: None,
        }
    }

    /// Session options.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Replace the source image and request a full render.
    pub fn load_image(&mut self, src: SourceImage) {
        self.geometry = OutputGeometry::fit(src.width(), src.height(), self.opts.max_output_side);
        tracing::debug!(
            src_w = src.width(),
            src_h = src.height(),
            out_w = self.geometry.width,
            out_h = self.geometry.height,
            "loaded source image"
        );
        self.source = Some(src);
        self.pipeline.invalidate_source();
        self.last_report = None;
        self.scheduler.request_render(true);
    }

    /// Decode and load encoded bytes. On failure the session keeps its previous image.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> FryResult<()> {
        match decode_image(bytes) {
            Ok(src) => {
                self.load_image(src);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "image decode failed; keeping current image");
                Err(e)
            }
        }
    }

    /// Read, decode and load an image file. On failure the session keeps its previous image.
    pub fn load_image_path(&mut self, path: &Path) -> FryResult<()> {
        match load_image_file(path) {
            Ok(src) => {
                self.load_image(src);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "image load failed; keeping current image");
                Err(e)
            }
        }
    }

    /// Load the built-in demo image.
    pub fn load_demo_image(&mut self) -> FryResult<()> {
        let src = demo_image()?;
        self.load_image(src);
        Ok(())
    }

    /// Drop the source image and everything rendered from it.
    pub fn clear_image(&mut self) {
        self.source = None;
        self.scheduler.cancel();
        self.geometry = OutputGeometry::default();
        self.pipeline.invalidate_source();
        self.last_report = None;
    }

    /// Whether a source image is loaded.
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// The loaded source image.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Output geometry of the loaded image (zero when none).
    pub fn geometry(&self) -> OutputGeometry {
        self.geometry
    }

    /// Current parameters.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Set one control (clamped) and request a render.
    pub fn set_param(&mut self, param: Param, value: f32) {
        self.params.set(param, value);
        self.params_changed();
    }

    /// Replace every control and request a render.
    pub fn set_params(&mut self, params: ParameterSet) {
        self.params = params;
        self.params_changed();
    }

    /// Apply a preset bundle and request a render.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.params.apply_preset(preset);
        self.params_changed();
    }

    fn params_changed(&mut self) {
        let force_full = !self.scheduler.is_scrubbing();
        self.request_render(force_full);
    }

    /// A control started being dragged.
    pub fn begin_scrub(&mut self) {
        self.scheduler.begin_scrub();
    }

    /// The drag ended; the next render runs at full quality.
    pub fn end_scrub(&mut self) {
        self.scheduler.end_scrub();
    }

    /// Whether a control is being dragged.
    pub fn is_scrubbing(&self) -> bool {
        self.scheduler.is_scrubbing()
    }

    /// Ask for a render at the next refresh. No-op without an image.
    pub fn request_render(&mut self, force_full: bool) {
        if self.source.is_none() {
            return;
        }
        self.scheduler.request_render(force_full);
    }

    /// Handle a refresh callback. Returns the report of the frame that ran, if any.
    pub fn on_refresh(&mut self, ticket: FrameTicket) -> FryResult<Option<FrameReport>> {
        let Some(quality) = self.scheduler.fire(ticket) else {
            return Ok(None);
        };
        self.render_now(quality)
    }

    fn render_now(&mut self, quality: RenderQuality) -> FryResult<Option<FrameReport>> {
        let Some(src) = self.source.as_ref() else {
            return Ok(None);
        };
        let report = self
            .pipeline
            .render(src, self.geometry, &self.params, quality)?;
        self.last_report = Some(report.clone());
        Ok(Some(report))
    }

    /// The output surface, once a frame has rendered.
    pub fn surface(&self) -> Option<&Raster> {
        self.pipeline.output()
    }

    /// Encode the output surface with the session's export options.
    ///
    /// Silently skipped without an image. If the surface is missing or was last drawn at preview
    /// quality, a full frame is rendered first.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn export(&mut self) -> FryResult<ExportOutcome> {
        let opts = self.opts.export;
        self.export_with(opts)
    }

    /// [`FrySession::export`] with explicit options.
    pub fn export_with(&mut self, opts: ExportOpts) -> FryResult<ExportOutcome> {
        if self.source.is_none() {
            return Ok(ExportOutcome::Skipped(ExportNotice::NoImage));
        }
        let stale = self.surface().is_none()
            || self
                .last_report
                .as_ref()
                .is_some_and(|r| r.quality != RenderQuality::Full);
        if stale {
            self.render_now(RenderQuality::Full)?;
        }
        match self.surface() {
            Some(surface) => export_surface(surface, opts),
            None => Ok(ExportOutcome::Skipped(ExportNotice::NoImage)),
        }
    }

    /// Scheduler counters.
    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Buffer pool counters.
    pub fn pool_stats(&self) -> BufferPoolStats {
        self.pipeline.pool_stats()
    }

    /// Report of the most recent frame.
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    /// The injected clock.
    pub fn clock(&self) -> &C {
        self.scheduler.clock()
    }

    /// Mutable access to the injected clock.
    pub fn clock_mut(&mut self) -> &mut C {
        self.scheduler.clock_mut()
    }
}

impl FrySession<SteppedClock> {
    /// Session on a [`SteppedClock`].
    pub fn stepped(opts: SessionOpts) -> Self {
        Self::new(SteppedClock::new(), opts)
    }

    /// Advance one refresh and run the frame it fires, if any.
    pub fn step(&mut self) -> FryResult<Option<FrameReport>> {
        match self.clock_mut().step() {
            Some(ticket) => self.on_refresh(ticket),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/fry_session.rs"]
mod tests;
