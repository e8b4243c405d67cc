use rand::Rng;

use crate::foundation::core::Raster;
use crate::foundation::math::{clamp_trunc_u8, luminance};
use crate::params::model::ParameterSet;
use crate::passes::color_grade::BRIGHTNESS_CEILING;

// Highlight mask: starts at luma 110 and reaches 1.0 at 255.
const MASK_START: f32 = 110.0;
const MASK_SPAN: f32 = 145.0;

// Fixed film-burn constants.
const RED_PUSH: f32 = 1.15;
const GREEN_PUSH: f32 = 0.7475;
const BLUE_PUSH: f32 = 0.4025;
const WARM_LIFT: f32 = 255.0 * 0.45;
const BLUE_DROP: f32 = 255.0 * 0.28;

/// Per-pixel exposure, extra gain, burn, posterize and noise.
#[derive(Clone, Debug)]
pub(crate) struct TonalBurn {
    gain: f32,
    burn: f32,
    posterize_step: Option<f32>,
    noise: f32,
}

impl TonalBurn {
    /// Build the pass; `heavy` enables posterize and noise.
    pub(crate) fn new(params: &ParameterSet, heavy: bool) -> Self {
        let exposure_gain = params.exposure().exp2();
        let extra_gain = (params.brightness() / BRIGHTNESS_CEILING).max(1.0);
        let levels = params.posterize();
        Self {
            gain: exposure_gain * extra_gain,
            burn: params.burn_amount(),
            posterize_step: (heavy && levels > 1).then(|| 255.0 / f32::from(levels - 1)),
            noise: if heavy { params.noise().max(0.0) } else { 0.0 },
        }
    }

    /// False only when the pass would leave every pixel unchanged.
    pub(crate) fn is_needed(params: &ParameterSet, heavy: bool) -> bool {
        params.exposure() != 0.0
            || params.brightness() > BRIGHTNESS_CEILING
            || params.burn() > 0.0
            || heavy
    }

    /// Gain and burn for one pixel, before posterize, noise and clamping.
    pub(crate) fn transform(&self, rgb: [f32; 3]) -> [f32; 3] {
        let [mut r, mut g, mut b] = rgb.map(|c| c * self.gain);

        let k = self.burn;
        if k > 0.0 {
            let t = ((luminance(r, g, b) - MASK_START) / MASK_SPAN).clamp(0.0, 1.0);
            let kt = k * t;
            r = r * (1.0 + RED_PUSH * kt) + WARM_LIFT * kt * 0.6;
            g = g * (1.0 + GREEN_PUSH * kt) + WARM_LIFT * kt * 0.3;
            b = b * (1.0 + BLUE_PUSH * kt) - BLUE_DROP * kt * 0.2;
        }
        [r, g, b]
    }

    pub(crate) fn apply_in_place<R: Rng + ?Sized>(&self, buf: &mut Raster, rng: &mut R) {
        let grain = self.noise * 255.0;
        for px in buf.data_mut().chunks_exact_mut(4) {
            let mut v = self.transform([f32::from(px[0]), f32::from(px[1]), f32::from(px[2])]);

            if let Some(step) = self.posterize_step {
                v = v.map(|c| (c / step).round() * step);
            }
            if grain > 0.0 {
                let offset = rng.gen_range(-1.0f32..1.0) * grain;
                v = v.map(|c| c + offset);
            }

            px[0] = clamp_trunc_u8(v[0]);
            px[1] = clamp_trunc_u8(v[1]);
            px[2] = clamp_trunc_u8(v[2]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/passes/tonal_burn.rs"]
mod tests;
