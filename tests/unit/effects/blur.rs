use super::*;

#[test]
fn radius_0_is_identity() {
    let mut buf = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let mut scratch = vec![0u8; 8];
    blur_rgba8_premul_in_place(&mut buf, &mut scratch, 1, 2, 0, 1.0).unwrap();
    assert_eq!(buf, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20, 30, 40];
    let mut buf = px.repeat((w * h) as usize);
    let mut scratch = vec![0u8; buf.len()];
    blur_rgba8_premul_in_place(&mut buf, &mut scratch, w, h, 2, 1.5).unwrap();
    assert_eq!(buf, px.repeat((w * h) as usize));
}

#[test]
fn spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    buf[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let mut scratch = vec![0u8; buf.len()];

    blur_rgba8_premul_in_place(&mut buf, &mut scratch, w, h, 2, 1.2).unwrap();

    let lit = buf.chunks_exact(4).filter(|px| px[0] != 0).count();
    assert!(lit > 1);
    let sum: u32 = buf.chunks_exact(4).map(|px| u32::from(px[0])).sum();
    assert!((sum as i32 - 255).abs() <= 4);
}

#[test]
fn rejects_bad_sigma_and_lengths() {
    let mut buf = vec![0u8; 16];
    let mut scratch = vec![0u8; 16];
    assert!(blur_rgba8_premul_in_place(&mut buf, &mut scratch, 2, 2, 1, 0.0).is_err());
    let mut short = vec![0u8; 4];
    assert!(blur_rgba8_premul_in_place(&mut buf, &mut short, 2, 2, 1, 1.0).is_err());
}
