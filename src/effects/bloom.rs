use crate::effects::blend::{BlendMode, blend_in_place};
use crate::effects::blur::blur_rgba8_premul_in_place;
use crate::foundation::core::{OutputGeometry, Raster};
use crate::foundation::error::FryResult;
use crate::foundation::math::{premultiply_rgba8, unpremultiply_rgba8};
use crate::render::pool::BufferPool;
use crate::render::resample::resize_into;

/// Linear scale of the glow buffer relative to the working buffer.
pub(crate) const BLOOM_SCALE: f64 = 0.25;

const BLOOM_STRENGTH: f32 = 0.35;
const BLOOM_BLUR_RADIUS: u32 = 2;
const BLOOM_BLUR_SIGMA: f32 = 1.2;

/// Soft highlight glow: shrink, soften, stretch back and screen over the working buffer.
///
/// No-op when `burn_amount <= 0`.
pub(crate) fn apply_bloom(
    buf: &mut Raster,
    burn_amount: f32,
    scale: f64,
    pool: &mut BufferPool,
) -> FryResult<()> {
    let amount = burn_amount.clamp(0.0, 1.0);
    if amount <= 0.0 || buf.is_empty() {
        return Ok(());
    }

    let (w, h) = buf.dims();
    let (sw, sh) = OutputGeometry {
        width: w,
        height: h,
    }
    .scaled(scale);

    let mut small = pool.borrow(sw, sh);
    let mut scratch = pool.borrow(sw, sh);
    let mut glow = pool.borrow(w, h);

    resize_into(buf, &mut small);
    premultiply_rgba8(small.data_mut());
    let blurred = blur_rgba8_premul_in_place(
        small.data_mut(),
        scratch.data_mut(),
        sw,
        sh,
        BLOOM_BLUR_RADIUS,
        BLOOM_BLUR_SIGMA,
    );
    let composited = blurred.and_then(|()| {
        unpremultiply_rgba8(small.data_mut());
        resize_into(&small, &mut glow);
        blend_in_place(
            buf.data_mut(),
            glow.data(),
            BlendMode::Screen,
            BLOOM_STRENGTH * amount,
        )
    });

    pool.release(glow);
    pool.release(scratch);
    pool.release(small);
    composited
}

#[cfg(test)]
#[path = "../../tests/unit/effects/bloom.rs"]
mod tests;
