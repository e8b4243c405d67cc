use super::*;

#[test]
fn screen_and_multiply_identities() {
    for v in [0u8, 1, 77, 128, 254, 255] {
        assert_eq!(screen(v, 0), v);
        assert_eq!(screen(v, 255), 255);
        assert_eq!(multiply(v, 255), v);
        assert_eq!(multiply(v, 0), 0);
    }
}

#[test]
fn screen_never_darkens_and_multiply_never_lightens() {
    for a in (0u8..=255).step_by(17) {
        for b in (0u8..=255).step_by(15) {
            assert!(screen(a, b) >= a.max(b));
            assert!(multiply(a, b) <= a.min(b));
        }
    }
}

#[test]
fn blend_opacity_0_is_noop() {
    let mut dst = vec![10u8, 20, 30, 40];
    let src = vec![200u8, 200, 200, 200];
    blend_in_place(&mut dst, &src, BlendMode::Screen, 0.0).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 40]);
}

#[test]
fn blend_keeps_destination_alpha() {
    let mut dst = vec![10u8, 20, 30, 40];
    let src = vec![255u8, 255, 255, 255];
    blend_in_place(&mut dst, &src, BlendMode::Normal, 1.0).unwrap();
    assert_eq!(dst, vec![255, 255, 255, 40]);
}

#[test]
fn blend_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(blend_in_place(&mut dst, &[0u8; 4], BlendMode::Screen, 1.0).is_err());
}

#[test]
fn shifted_blend_leaves_uncovered_column() {
    let (w, h) = (3u32, 1u32);
    let mut dst = [0u8, 0, 0, 255].repeat(3);
    let src = vec![255u8, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255];
    blend_shifted_in_place(&mut dst, &src, w, h, 1, BlendMode::Screen, 1.0).unwrap();
    assert_eq!(&dst[0..4], &[0, 0, 0, 255]);
    assert_eq!(&dst[4..8], &[255, 0, 0, 255]);
    assert_eq!(&dst[8..12], &[0, 255, 0, 255]);
}

#[test]
fn blend_pixel_multiply_black_darkens_by_alpha() {
    let mut px = [200u8, 100, 50, 255];
    blend_pixel(&mut px, [0.0, 0.0, 0.0], 0.5, BlendMode::Multiply);
    assert_eq!(px, [100, 50, 25, 255]);
}

#[test]
fn fill_row_normal_full_opacity_replaces_rgb() {
    let mut row = [9u8, 9, 9, 128].repeat(2);
    fill_row(&mut row, [0, 0, 0], BlendMode::Normal, 1.0);
    assert_eq!(row, vec![0, 0, 0, 128, 0, 0, 0, 128]);
}
