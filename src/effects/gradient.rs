use crate::effects::blend::{BlendMode, blend_pixel};
use crate::foundation::core::Raster;
use crate::foundation::math::lerp;

/// One color stop: normalized RGB plus alpha at `offset` along the gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorStop {
    pub(crate) offset: f32,
    pub(crate) rgb: [f32; 3],
    pub(crate) alpha: f32,
}

impl ColorStop {
    pub(crate) fn new(offset: f32, rgb: [u8; 3], alpha: f32) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            rgb: rgb.map(|c| f32::from(c) / 255.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// Concentric radial gradient between radii `r0` and `r1`, padded past both ends.
#[derive(Clone, Debug)]
pub(crate) struct RadialGradient {
    pub(crate) cx: f32,
    pub(crate) cy: f32,
    pub(crate) r0: f32,
    pub(crate) r1: f32,
    pub(crate) stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Color and alpha at distance `d` from the centre.
    pub(crate) fn sample(&self, d: f32) -> ([f32; 3], f32) {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return ([0.0; 3], 0.0);
        };
        let span = self.r1 - self.r0;
        let t = if span.abs() <= f32::EPSILON {
            if d < self.r0 { 0.0 } else { 1.0 }
        } else {
            ((d - self.r0) / span).clamp(0.0, 1.0)
        };

        if t <= first.offset {
            return (first.rgb, first.alpha);
        }
        if t >= last.offset {
            return (last.rgb, last.alpha);
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let w = b.offset - a.offset;
                let k = if w <= f32::EPSILON {
                    1.0
                } else {
                    (t - a.offset) / w
                };
                let rgb = [
                    lerp(a.rgb[0], b.rgb[0], k),
                    lerp(a.rgb[1], b.rgb[1], k),
                    lerp(a.rgb[2], b.rgb[2], k),
                ];
                return (rgb, lerp(a.alpha, b.alpha, k));
            }
        }
        (last.rgb, last.alpha)
    }

    /// Fill the whole raster with this gradient using `mode`. Pixels at zero coverage are skipped.
    pub(crate) fn composite(&self, dst: &mut Raster, mode: BlendMode) {
        let (w, _) = dst.dims();
        if dst.is_empty() {
            return;
        }
        let row_bytes = (w as usize) * 4;
        for (y, row) in dst.data_mut().chunks_exact_mut(row_bytes).enumerate() {
            let py = y as f32 + 0.5 - self.cy;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let px_x = x as f32 + 0.5 - self.cx;
                let d = (px_x * px_x + py * py).sqrt();
                let (rgb, alpha) = self.sample(d);
                blend_pixel(px, rgb, alpha, mode);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;
