use crate::foundation::core::Raster;
use crate::foundation::error::{FryError, FryResult};
use crate::foundation::math::unit_to_u8;
use crate::params::model::ParameterSet;

/// Brightness above this percentage is deferred to the tonal pass as linear gain.
pub(crate) const BRIGHTNESS_CEILING: f32 = 200.0;

type Mat3 = [[f32; 3]; 3];

const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Global grade: brightness, contrast, saturate, hue-rotate, in that order.
///
/// Brightness and contrast are per-channel curves and are baked into a lookup table. Saturation
/// and hue are 3x3 matrices over the luma weights 0.213/0.715/0.072.
#[derive(Clone, Debug)]
pub(crate) struct ColorGrade {
    curve: [f32; 256],
    saturate: Mat3,
    hue: Option<Mat3>,
}

impl ColorGrade {
    pub(crate) fn new(params: &ParameterSet) -> Self {
        let brightness = effective_brightness(params) / 100.0;
        let contrast = params.contrast() / 100.0;

        let mut curve = [0.0f32; 256];
        for (i, v) in curve.iter_mut().enumerate() {
            let x = (i as f32 / 255.0 * brightness).clamp(0.0, 1.0);
            *v = ((x - 0.5) * contrast + 0.5).clamp(0.0, 1.0);
        }

        let hue_deg = params.hue();
        Self {
            curve,
            saturate: saturate_matrix(params.saturation() / 100.0),
            hue: (hue_deg != 0.0).then(|| hue_rotate_matrix(hue_deg)),
        }
    }

    pub(crate) fn apply_pixel(&self, rgb: [u8; 3]) -> [u8; 3] {
        let v = rgb.map(|c| self.curve[c as usize]);
        let mut v = mul_clamped(&self.saturate, v);
        if let Some(h) = &self.hue {
            v = mul_clamped(h, v);
        }
        v.map(unit_to_u8)
    }

    /// Grade `src` into `dst`; both must share dimensions. Alpha is copied through.
    pub(crate) fn apply_into(&self, src: &Raster, dst: &mut Raster) -> FryResult<()> {
        if src.dims() != dst.dims() {
            return Err(FryError::evaluation(
                "color grade expects source and target of equal size",
            ));
        }
        for (d, s) in dst
            .data_mut()
            .chunks_exact_mut(4)
            .zip(src.data().chunks_exact(4))
        {
            let [r, g, b] = self.apply_pixel([s[0], s[1], s[2]]);
            d[0] = r;
            d[1] = g;
            d[2] = b;
            d[3] = s[3];
        }
        Ok(())
    }
}

pub(crate) fn effective_brightness(params: &ParameterSet) -> f32 {
    params.brightness().min(BRIGHTNESS_CEILING)
}

fn mul_clamped(m: &Mat3, v: [f32; 3]) -> [f32; 3] {
    let row = |r: &[f32; 3]| (r[0] * v[0] + r[1] * v[1] + r[2] * v[2]).clamp(0.0, 1.0);
    [row(&m[0]), row(&m[1]), row(&m[2])]
}

fn saturate_matrix(s: f32) -> Mat3 {
    if s == 1.0 {
        return IDENTITY;
    }
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(deg: f32) -> Mat3 {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/passes/color_grade.rs"]
mod tests;
