use super::*;

#[test]
fn demo_has_fixed_size_and_is_opaque() {
    let img = demo_image().unwrap();
    assert_eq!((img.width(), img.height()), (DEMO_WIDTH, DEMO_HEIGHT));
    assert!(img.raster().data().chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn demo_gradient_runs_warm_to_cool() {
    let img = demo_image().unwrap();
    let top_left = img.raster().pixel(2, 2).unwrap();
    let bottom_right = img.raster().pixel(637, 797).unwrap();
    assert!(top_left[0] > top_left[2]);
    assert!(bottom_right[2] > bottom_right[0]);
}
