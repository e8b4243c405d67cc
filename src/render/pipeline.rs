use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::effects::bloom::{BLOOM_SCALE, apply_bloom};
use crate::effects::overlay::plan_overlays;
use crate::foundation::core::{OutputGeometry, PREVIEW_SCALE, Raster, SourceImage};
use crate::foundation::error::FryResult;
use crate::params::model::ParameterSet;
use crate::passes::color_grade::ColorGrade;
use crate::passes::tonal_burn::TonalBurn;
use crate::render::pool::{BufferPool, BufferPoolOpts, BufferPoolStats};
use crate::render::resample::resize_into;
use crate::render::scheduler::RenderQuality;

/// Options for [`RenderPipeline`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PipelineOpts {
    /// Linear working scale for preview renders.
    pub(crate) preview_scale: f64,
    /// Linear scale of the bloom glow buffer relative to the working buffer.
    pub(crate) bloom_scale: f64,
    /// Fixed noise seed. `None` seeds from OS entropy.
    pub(crate) noise_seed: Option<u64>,
    /// Working buffer reuse limits.
    pub(crate) pool: BufferPoolOpts,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            preview_scale: PREVIEW_SCALE,
            bloom_scale: BLOOM_SCALE,
            noise_seed: None,
            pool: BufferPoolOpts::default(),
        }
    }
}

/// What one executed render did.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Quality the frame ran at.
    pub quality: RenderQuality,
    /// Working buffer width.
    pub working_width: u32,
    /// Working buffer height.
    pub working_height: u32,
    /// Output surface width.
    pub output_width: u32,
    /// Output surface height.
    pub output_height: u32,
    /// Whether the tonal/burn pass ran.
    pub tonal: bool,
    /// Whether bloom ran.
    pub bloom: bool,
    /// Overlays composited onto the output surface.
    pub overlays: usize,
    /// Largest pooled buffer, in pixels, borrowed by the passes before the output blit.
    pub working_peak_pixels: usize,
}

/// Runs the passes for one frame and owns every buffer they touch.
#[derive(Debug)]
pub(crate) struct RenderPipeline {
    opts: PipelineOpts,
    pool: BufferPool,
    scaled_sources: HashMap<(u32, u32), Raster>,
    output: Option<Raster>,
    rng: StdRng,
}

impl RenderPipeline {
    pub(crate) fn new(opts: PipelineOpts) -> Self {
        let rng = match opts.noise_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            pool: BufferPool::new(opts.pool),
            opts,
            scaled_sources: HashMap::new(),
            output: None,
            rng,
        }
    }

    /// The output surface, if a frame has been rendered since the last invalidation.
    pub(crate) fn output(&self) -> Option<&Raster> {
        self.output.as_ref()
    }

    pub(crate) fn pool_stats(&self) -> BufferPoolStats {
        self.pool.stats()
    }

    /// Forget everything derived from the current source image.
    pub(crate) fn invalidate_source(&mut self) {
        self.scaled_sources.clear();
        self.output = None;
        self.pool.clear();
    }

    /// Render one frame of `src` into the output surface.
    #[tracing::instrument(
        level = "debug",
        skip(self, src, params),
        fields(w = geom.width, h = geom.height)
    )]
    pub(crate) fn render(
        &mut self,
        src: &SourceImage,
        geom: OutputGeometry,
        params: &ParameterSet,
        quality: RenderQuality,
    ) -> FryResult<FrameReport> {
        if geom.is_empty() {
            self.output = Some(Raster::new(geom.width, geom.height));
            return Ok(FrameReport {
                quality,
                working_width: 0,
                working_height: 0,
                output_width: geom.width,
                output_height: geom.height,
                tonal: false,
                bloom: false,
                overlays: 0,
                working_peak_pixels: 0,
            });
        }

        let (w, h) = match quality {
            RenderQuality::Full => (geom.width, geom.height),
            RenderQuality::Preview => geom.scaled(self.opts.preview_scale),
        };
        let heavy = quality.heavy();
        self.pool.reset_peak();

        let scaled = self.scaled_sources.entry((w, h)).or_insert_with(|| {
            tracing::debug!(w, h, "caching resampled source");
            let mut r = Raster::new(w, h);
            resize_into(src.raster(), &mut r);
            r
        });

        let tonal = TonalBurn::is_needed(params, heavy);
        let bloom = heavy && params.burn_amount() > 0.0;

        let mut work = self.pool.borrow(w, h);
        let passes = ColorGrade::new(params)
            .apply_into(scaled, &mut work)
            .and_then(|()| {
                if tonal {
                    TonalBurn::new(params, heavy).apply_in_place(&mut work, &mut self.rng);
                }
                if bloom {
                    apply_bloom(
                        &mut work,
                        params.burn_amount(),
                        self.opts.bloom_scale,
                        &mut self.pool,
                    )?;
                }
                Ok(())
            });
        let working_peak_pixels = self.pool.stats().peak_borrow_pixels;
        if let Err(e) = passes {
            self.pool.release(work);
            return Err(e);
        }

        let mut out = self.output.take().unwrap_or_else(|| Raster::new(0, 0));
        out.reshape(geom.width, geom.height);
        resize_into(&work, &mut out);
        self.pool.release(work);

        let overlays = plan_overlays(params);
        for o in &overlays {
            o.apply(&mut out, &mut self.pool)?;
        }
        self.output = Some(out);

        Ok(FrameReport {
            quality,
            working_width: w,
            working_height: h,
            output_width: geom.width,
            output_height: geom.height,
            tonal,
            bloom,
            overlays: overlays.len(),
            working_peak_pixels,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
