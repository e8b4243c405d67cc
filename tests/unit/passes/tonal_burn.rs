use super::*;
use crate::params::model::Param;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn run(params: &ParameterSet, heavy: bool, px: [u8; 4]) -> [u8; 4] {
    let mut buf = Raster::filled(1, 1, px);
    let mut rng = StdRng::seed_from_u64(7);
    TonalBurn::new(params, heavy).apply_in_place(&mut buf, &mut rng);
    buf.pixel(0, 0).unwrap()
}

#[test]
fn neutral_is_skipped_unless_heavy() {
    let p = ParameterSet::neutral();
    assert!(!TonalBurn::is_needed(&p, false));
    assert!(TonalBurn::is_needed(&p, true));
    assert!(TonalBurn::is_needed(&p.clone().with(Param::Burn, 1.0), false));
    assert!(TonalBurn::is_needed(&p.clone().with(Param::Exposure, -0.5), false));
    assert!(TonalBurn::is_needed(&p.with(Param::Brightness, 201.0), false));
}

#[test]
fn plus_one_ev_doubles_channels() {
    let p = ParameterSet::neutral().with(Param::Exposure, 1.0);
    let pass = TonalBurn::new(&p, true);
    assert_eq!(pass.transform([10.0, 60.0, 127.0]), [20.0, 120.0, 254.0]);
    assert_eq!(run(&p, true, [10, 60, 200, 255]), [20, 120, 255, 255]);
}

#[test]
fn brightness_above_ceiling_becomes_extra_gain() {
    let p = ParameterSet::neutral().with(Param::Brightness, 300.0);
    let pass = TonalBurn::new(&p, false);
    assert_eq!(pass.transform([100.0, 0.0, 10.0]), [150.0, 0.0, 15.0]);
}

#[test]
fn full_burn_on_white_warms_and_cools_blue() {
    let p = ParameterSet::neutral().with(Param::Burn, 100.0);
    let pass = TonalBurn::new(&p, false);
    let [r, g, b] = pass.transform([255.0, 255.0, 255.0]);
    assert!(r > 255.0 && g > 255.0);
    let expected_b = 255.0 * (1.0 + 0.4025) - 255.0 * 0.28 * 0.2;
    assert!((b - expected_b).abs() < 1e-3);
    assert_eq!(run(&p, false, [255, 255, 255, 255]), [255, 255, 255, 255]);
}

#[test]
fn burn_reduces_blue_on_bright_blue_poor_pixel() {
    let p = ParameterSet::neutral().with(Param::Burn, 100.0);
    let out = run(&p, false, [255, 255, 10, 255]);
    assert_eq!(out[0], 255);
    assert_eq!(out[1], 255);
    assert!(out[2] < 10);
}

#[test]
fn burn_ignores_shadows() {
    let p = ParameterSet::neutral().with(Param::Burn, 100.0);
    assert_eq!(run(&p, false, [40, 50, 60, 255]), [40, 50, 60, 255]);
}

#[test]
fn posterize_two_levels_is_binary() {
    let p = ParameterSet::neutral().with(Param::Posterize, 2.0);
    for v in [0u8, 10, 127, 128, 200, 255] {
        let out = run(&p, true, [v, v / 2, 255 - v, 255]);
        for c in &out[..3] {
            assert!(*c == 0 || *c == 255, "{v} -> {out:?}");
        }
    }
}

#[test]
fn posterize_and_noise_need_heavy() {
    let p = ParameterSet::neutral()
        .with(Param::Posterize, 2.0)
        .with(Param::Noise, 1.0)
        .with(Param::Exposure, 0.5);
    let light = TonalBurn::new(&p, false);
    assert!(light.posterize_step.is_none());
    assert_eq!(light.noise, 0.0);
}

#[test]
fn noise_offsets_all_channels_equally() {
    let p = ParameterSet::neutral().with(Param::Noise, 0.5);
    let mut buf = Raster::filled(16, 16, [128, 128, 128, 255]);
    let mut rng = StdRng::seed_from_u64(42);
    TonalBurn::new(&p, true).apply_in_place(&mut buf, &mut rng);
    let mut changed = 0;
    for px in buf.data().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
        if px[0] != 128 {
            changed += 1;
        }
    }
    assert!(changed > 0);
}

#[test]
fn output_is_clamped_for_extreme_params() {
    let mut p = ParameterSet::from_preset(crate::params::preset::Preset::Ultra);
    p.set(Param::Exposure, 2.0);
    p.set(Param::Brightness, 400.0);
    p.set(Param::Noise, 1.0);
    let mut buf = Raster::new(8, 8);
    for (i, b) in buf.data_mut().iter_mut().enumerate() {
        *b = (i * 37 % 256) as u8;
    }
    let mut rng = StdRng::seed_from_u64(3);
    TonalBurn::new(&p, true).apply_in_place(&mut buf, &mut rng);
    // u8 storage already bounds values; the point is no panic and alpha untouched.
    for (i, px) in buf.data().chunks_exact(4).enumerate() {
        assert_eq!(px[3], ((i * 4 + 3) * 37 % 256) as u8);
    }
}

#[test]
fn exposure_is_monotonic_in_luminance() {
    for burn in [0.0f32, 50.0, 100.0] {
        for base in [[0.0f32, 0.0, 0.0], [30.0, 90.0, 10.0], [120.0, 120.0, 120.0], [250.0, 20.0, 240.0]] {
            let mut last = f32::MIN;
            for step in 0..=16 {
                let ev = -2.0 + step as f32 * 0.25;
                let p = ParameterSet::neutral()
                    .with(Param::Burn, burn)
                    .with(Param::Exposure, ev);
                let [r, g, b] = TonalBurn::new(&p, false).transform(base);
                let l = luminance(r, g, b);
                assert!(l >= last - 1e-3, "burn {burn} base {base:?} ev {ev}");
                last = l;
            }
        }
    }
}
