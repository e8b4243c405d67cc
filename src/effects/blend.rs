use crate::foundation::error::{FryError, FryResult};
use crate::foundation::math::mul_div255_u8;

/// Separable blend operator applied per color channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Source replaces destination.
    Normal,
    /// `a * b`; darkens.
    Multiply,
    /// `1 - (1 - a)(1 - b)`; lightens.
    Screen,
}

impl BlendMode {
    /// Blend one 8-bit channel at full opacity.
    pub fn apply(self, dst: u8, src: u8) -> u8 {
        match self {
            BlendMode::Normal => src,
            BlendMode::Multiply => multiply(dst, src),
            BlendMode::Screen => screen(dst, src),
        }
    }

    /// Blend one normalized channel at full opacity.
    pub fn apply_unit(self, dst: f32, src: f32) -> f32 {
        match self {
            BlendMode::Normal => src,
            BlendMode::Multiply => dst * src,
            BlendMode::Screen => 1.0 - (1.0 - dst) * (1.0 - src),
        }
    }
}

pub fn multiply(a: u8, b: u8) -> u8 {
    mul_div255_u8(u16::from(a), u16::from(b))
}

pub fn screen(a: u8, b: u8) -> u8 {
    255 - mul_div255_u8(u16::from(255 - a), u16::from(255 - b))
}

/// `dst + (blended - dst) * op / 255` in integer math.
fn mix_u8(dst: u8, blended: u8, op: u16) -> u8 {
    if blended >= dst {
        dst.saturating_add(mul_div255_u8(u16::from(blended - dst), op))
    } else {
        dst.saturating_sub(mul_div255_u8(u16::from(dst - blended), op))
    }
}

fn opacity_u16(opacity: f32) -> u16 {
    ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16
}

/// Composite a source color onto one RGBA pixel. Alpha of `dst` is preserved.
///
/// `src` is normalized RGB and `alpha` the source coverage in `0..=1`.
pub fn blend_pixel(dst: &mut [u8], src: [f32; 3], alpha: f32, mode: BlendMode) {
    if alpha <= 0.0 {
        return;
    }
    let a = alpha.min(1.0);
    for c in 0..3 {
        let d = f32::from(dst[c]) / 255.0;
        let b = mode.apply_unit(d, src[c].clamp(0.0, 1.0));
        let out = d + (b - d) * a;
        dst[c] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

/// Blend `src` onto `dst` with `mode` at `opacity`. RGB only; `dst` alpha is kept.
pub fn blend_in_place(dst: &mut [u8], src: &[u8], mode: BlendMode, opacity: f32) -> FryResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FryError::evaluation(
            "blend_in_place expects equal-length rgba8 buffers",
        ));
    }
    let op = opacity_u16(opacity);
    if op == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        for c in 0..3 {
            d[c] = mix_u8(d[c], mode.apply(d[c], s[c]), op);
        }
    }
    Ok(())
}

/// Blend `src` onto `dst` displaced by `dx` columns, like drawing an image at `(dx, 0)`.
///
/// Destination columns with no source pixel under them are left untouched.
pub fn blend_shifted_in_place(
    dst: &mut [u8],
    src: &[u8],
    width: u32,
    height: u32,
    dx: i32,
    mode: BlendMode,
    opacity: f32,
) -> FryResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FryError::evaluation("shifted blend buffer size overflow"))?;
    if dst.len() != expected || src.len() != expected {
        return Err(FryError::evaluation(
            "blend_shifted_in_place expects buffers matching width*height*4",
        ));
    }
    let op = opacity_u16(opacity);
    if op == 0 {
        return Ok(());
    }

    let w = width as i64;
    let row_bytes = (width as usize) * 4;
    for (drow, srow) in dst
        .chunks_exact_mut(row_bytes)
        .zip(src.chunks_exact(row_bytes))
    {
        for x in 0..w {
            let sx = x - i64::from(dx);
            if sx < 0 || sx >= w {
                continue;
            }
            let di = (x as usize) * 4;
            let si = (sx as usize) * 4;
            for c in 0..3 {
                let d = drow[di + c];
                drow[di + c] = mix_u8(d, mode.apply(d, srow[si + c]), op);
            }
        }
    }
    Ok(())
}

/// Blend a solid color onto one row of RGBA pixels with `mode` at `opacity`.
pub fn fill_row(row: &mut [u8], rgb: [u8; 3], mode: BlendMode, opacity: f32) {
    let op = opacity_u16(opacity);
    if op == 0 {
        return;
    }
    for px in row.chunks_exact_mut(4) {
        for c in 0..3 {
            px[c] = mix_u8(px[c], mode.apply(px[c], rgb[c]), op);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
