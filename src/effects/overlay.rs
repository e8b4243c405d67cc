use crate::effects::blend::{BlendMode, blend_shifted_in_place, fill_row};
use crate::effects::gradient::{ColorStop, RadialGradient};
use crate::foundation::core::Raster;
use crate::foundation::error::FryResult;
use crate::params::model::ParameterSet;
use crate::render::pool::BufferPool;

const WARM_YELLOW: [u8; 3] = [255, 214, 128];
const BURN_ORANGE: [u8; 3] = [255, 122, 36];
const EDGE_ORANGE: [u8; 3] = [255, 110, 20];

const ABERRATION_ALPHA: f32 = 0.35;

/// Burn-driven overlay strengths, applied after preset overlays whenever burn > 0.
const BURN_VIGNETTE: f32 = 0.28;
const BURN_EDGE: f32 = 0.5;

/// Post-pixel overlay composited onto the output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    /// Darken toward the edges (multiply).
    Vignette {
        /// Alpha of the black rim.
        strength: f32,
    },
    /// Warm light leak from the top-right corner (screen).
    FilmBurn {
        /// Scales both color stop alphas.
        energy: f32,
    },
    /// Black line on every other row.
    Scanlines {
        /// Line opacity.
        opacity: f32,
    },
    /// Screen the surface over itself shifted one pixel left and right.
    ChromaticAberration,
    /// Warm orange rim (screen).
    WarmEdgeBurn {
        /// Rim alpha, capped at 0.5.
        strength: f32,
    },
}

impl Overlay {
    /// Composite onto `surface` in place. RGB only; alpha is preserved.
    pub(crate) fn apply(&self, surface: &mut Raster, pool: &mut BufferPool) -> FryResult<()> {
        if surface.is_empty() {
            return Ok(());
        }
        match *self {
            Overlay::Vignette { strength } => vignette(surface, strength),
            Overlay::FilmBurn { energy } => film_burn(surface, energy),
            Overlay::Scanlines { opacity } => scanlines(surface, opacity),
            Overlay::ChromaticAberration => return chromatic_aberration(surface, pool),
            Overlay::WarmEdgeBurn { strength } => warm_edge_burn(surface, strength),
        }
        Ok(())
    }
}

/// Overlays for `params`, in compositing order: the preset's stack, then the burn-driven pair.
pub fn plan_overlays(params: &ParameterSet) -> Vec<Overlay> {
    let mut out = params.preset().overlays().to_vec();
    let burn = params.burn_amount();
    if burn > 0.0 {
        out.push(Overlay::Vignette {
            strength: BURN_VIGNETTE * burn,
        });
        out.push(Overlay::WarmEdgeBurn {
            strength: BURN_EDGE * burn,
        });
    }
    out
}

fn centre(surface: &Raster) -> (f32, f32) {
    let (w, h) = surface.dims();
    (w as f32 / 2.0, h as f32 / 2.0)
}

fn vignette(surface: &mut Raster, strength: f32) {
    let strength = strength.clamp(0.0, 1.0);
    if strength <= 0.0 {
        return;
    }
    let (w, h) = surface.dims();
    let (cx, cy) = centre(surface);
    RadialGradient {
        cx,
        cy,
        r0: 0.25 * w.min(h) as f32,
        r1: 0.7 * w.max(h) as f32,
        stops: vec![
            ColorStop::new(0.0, [0, 0, 0], 0.0),
            ColorStop::new(1.0, [0, 0, 0], strength),
        ],
    }
    .composite(surface, BlendMode::Multiply);
}

fn film_burn(surface: &mut Raster, energy: f32) {
    let energy = energy.clamp(0.0, 1.0);
    if energy <= 0.0 {
        return;
    }
    let (w, h) = surface.dims();
    RadialGradient {
        cx: 0.85 * w as f32,
        cy: 0.15 * h as f32,
        r0: 0.0,
        r1: 0.6 * w.max(h) as f32,
        stops: vec![
            ColorStop::new(0.0, WARM_YELLOW, 0.55 * energy),
            ColorStop::new(0.4, BURN_ORANGE, 0.35 * energy),
            ColorStop::new(1.0, BURN_ORANGE, 0.0),
        ],
    }
    .composite(surface, BlendMode::Screen);
}

fn scanlines(surface: &mut Raster, opacity: f32) {
    let row_bytes = (surface.width() as usize) * 4;
    for row in surface.data_mut().chunks_exact_mut(row_bytes).step_by(2) {
        fill_row(row, [0, 0, 0], BlendMode::Normal, opacity);
    }
}

fn chromatic_aberration(surface: &mut Raster, pool: &mut BufferPool) -> FryResult<()> {
    let (w, h) = surface.dims();
    let mut snapshot = pool.borrow(w, h);
    snapshot.data_mut().copy_from_slice(surface.data());

    let res = blend_shifted_in_place(
        surface.data_mut(),
        snapshot.data(),
        w,
        h,
        1,
        BlendMode::Screen,
        ABERRATION_ALPHA,
    )
    .and_then(|()| {
        blend_shifted_in_place(
            surface.data_mut(),
            snapshot.data(),
            w,
            h,
            -1,
            BlendMode::Screen,
            ABERRATION_ALPHA,
        )
    });

    pool.release(snapshot);
    res
}

fn warm_edge_burn(surface: &mut Raster, strength: f32) {
    let alpha = strength.clamp(0.0, 0.5);
    if alpha <= 0.0 {
        return;
    }
    let (w, h) = surface.dims();
    let (cx, cy) = centre(surface);
    let half_diag = (w as f32).hypot(h as f32) / 2.0;
    RadialGradient {
        cx,
        cy,
        r0: 0.55 * half_diag,
        r1: 0.95 * half_diag,
        stops: vec![
            ColorStop::new(0.0, EDGE_ORANGE, 0.0),
            ColorStop::new(1.0, EDGE_ORANGE, alpha),
        ],
    }
    .composite(surface, BlendMode::Screen);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlay.rs"]
mod tests;
