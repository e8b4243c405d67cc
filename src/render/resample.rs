use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};

use crate::foundation::core::{Raster, Rgba8};

/// Resize `src` into `dst` (whose dimensions are the target).
///
/// Area averaging when shrinking on both axes, triangle (bilinear) filtering otherwise. Sampling
/// runs on premultiplied color so fully transparent pixels never tint their neighbours. Equal
/// sizes copy.
pub(crate) fn resize_into(src: &Raster, dst: &mut Raster) {
    if src.is_empty() || dst.is_empty() {
        return;
    }
    if src.dims() == dst.dims() {
        dst.data_mut().copy_from_slice(src.data());
        return;
    }
    let (sw, sh) = src.dims();
    let (dw, dh) = dst.dims();
    let premul = premultiplied(src);
    let resized = if dw <= sw && dh <= sh {
        imageops::thumbnail(&premul, dw, dh)
    } else {
        imageops::resize(&premul, dw, dh, FilterType::Triangle)
    };
    for (out, px) in dst.data_mut().chunks_exact_mut(4).zip(resized.pixels()) {
        out.copy_from_slice(&unpremultiplied(px.0));
    }
}

type Premul16 = ImageBuffer<Rgba<u16>, Vec<u16>>;

fn premultiplied(src: &Raster) -> Premul16 {
    let (w, _) = src.dims();
    let data = src.data();
    ImageBuffer::from_fn(src.width(), src.height(), |x, y| {
        let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
        let a = u32::from(data[i + 3]);
        // c * a / 255 / 255, widened to 16 bits.
        let c = |v: u8| ((u32::from(v) * a * 65535 + 32512) / 65025) as u16;
        Rgba([c(data[i]), c(data[i + 1]), c(data[i + 2]), (a * 257) as u16])
    })
}

fn unpremultiplied([r, g, b, a]: [u16; 4]) -> Rgba8 {
    let a = u32::from(a);
    let alpha = ((a + 128) / 257) as u8;
    if alpha == 0 {
        return [0, 0, 0, 0];
    }
    let c = |v: u16| ((u32::from(v) * 255 + a / 2) / a).min(255) as u8;
    [c(r), c(g), c(b), alpha]
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
