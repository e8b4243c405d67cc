use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
}

#[test]
fn luma_weights_sum_to_one() {
    let sum: f32 = LUMA_709.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!((luminance(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
}

#[test]
fn clamp_trunc_truncates_and_saturates() {
    assert_eq!(clamp_trunc_u8(12.9), 12);
    assert_eq!(clamp_trunc_u8(-4.0), 0);
    assert_eq!(clamp_trunc_u8(999.0), 255);
    assert_eq!(clamp_trunc_u8(f32::NAN), 0);
}

#[test]
fn premultiply_is_identity_for_opaque_and_zeroes_transparent() {
    let mut buf = vec![10, 200, 255, 255, 255, 255, 255, 0, 200, 100, 50, 128];
    premultiply_rgba8(&mut buf);
    assert_eq!(&buf[..8], &[10, 200, 255, 255, 0, 0, 0, 0]);
    assert_eq!(&buf[8..], &[100, 50, 25, 128]);

    unpremultiply_rgba8(&mut buf);
    assert_eq!(&buf[..8], &[10, 200, 255, 255, 0, 0, 0, 0]);
    assert_eq!(&buf[8..], &[199, 100, 50, 128]);
}
