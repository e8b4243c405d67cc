/// Rec. 709 luma weights, used by the burn highlight mask.
pub(crate) const LUMA_709: [f32; 3] = [0.2126, 0.7152, 0.0722];

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_709[0] * r + LUMA_709[1] * g + LUMA_709[2] * b
}

/// Map a 0..=1 float to the nearest u8.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Clamp a 0..=255 float and truncate.
pub(crate) fn clamp_trunc_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Straight to premultiplied alpha over an RGBA8 buffer.
pub(crate) fn premultiply_rgba8(buf: &mut [u8]) {
    for px in buf.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

/// Inverse of [`premultiply_rgba8`]. Fully transparent pixels become `[0, 0, 0, 0]`.
pub(crate) fn unpremultiply_rgba8(buf: &mut [u8]) {
    for px in buf.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
