use super::*;
use crate::params::model::Param;
use crate::params::preset::Preset;

fn seeded() -> RenderPipeline {
    RenderPipeline::new(PipelineOpts {
        noise_seed: Some(11),
        ..PipelineOpts::default()
    })
}

fn ramp(w: u32, h: u32) -> SourceImage {
    let mut r = Raster::new(w, h);
    for (i, px) in r.data_mut().chunks_exact_mut(4).enumerate() {
        let v = (i * 7 % 256) as u8;
        px.copy_from_slice(&[v, 255 - v, v / 2, 255]);
    }
    SourceImage::new(r)
}

fn geom(src: &SourceImage) -> OutputGeometry {
    OutputGeometry::for_source(src)
}

#[test]
fn neutral_full_frame_is_identity() {
    let src = ramp(12, 9);
    let mut p = seeded();
    let report = p
        .render(&src, geom(&src), &ParameterSet::neutral(), RenderQuality::Full)
        .unwrap();
    assert!(report.tonal);
    assert!(!report.bloom);
    assert_eq!(report.overlays, 0);
    assert_eq!(p.output().unwrap(), src.raster());
}

#[test]
fn empty_geometry_yields_empty_surface() {
    let src = SourceImage::new(Raster::new(0, 5));
    let mut p = seeded();
    let report = p
        .render(&src, geom(&src), &ParameterSet::default(), RenderQuality::Full)
        .unwrap();
    assert_eq!((report.output_width, report.output_height), (0, 0));
    assert!(p.output().unwrap().is_empty());
    assert_eq!(p.pool_stats().alloc_buffers, 0);
}

#[test]
fn preview_runs_on_scaled_buffer_and_skips_heavy_passes() {
    let src = ramp(100, 60);
    let mut params = ParameterSet::neutral();
    params.set(Param::Burn, 80.0);
    params.set(Param::Noise, 1.0);
    params.set(Param::Posterize, 3.0);

    let mut p = seeded();
    let report = p
        .render(&src, geom(&src), &params, RenderQuality::Preview)
        .unwrap();
    assert_eq!((report.working_width, report.working_height), (35, 21));
    assert!(report.working_peak_pixels <= 35 * 21);
    assert!(report.tonal);
    assert!(!report.bloom);
    assert_eq!(report.overlays, 2);
    assert_eq!(p.output().unwrap().dims(), (100, 60));
}

#[test]
fn full_frame_with_burn_runs_bloom() {
    let src = ramp(40, 40);
    let params = ParameterSet::neutral().with(Param::Burn, 50.0);
    let mut p = seeded();
    let report = p
        .render(&src, geom(&src), &params, RenderQuality::Full)
        .unwrap();
    assert!(report.tonal && report.bloom);
    assert_eq!((report.working_width, report.working_height), (40, 40));
}

#[test]
fn repeated_full_render_without_noise_is_byte_identical() {
    let src = ramp(30, 20);
    let params = ParameterSet::from_preset(Preset::Ultra).with(Param::Noise, 0.0);
    let mut p = seeded();
    p.render(&src, geom(&src), &params, RenderQuality::Full)
        .unwrap();
    let first = p.output().unwrap().clone();
    p.render(&src, geom(&src), &params, RenderQuality::Full)
        .unwrap();
    assert_eq!(p.output().unwrap(), &first);
}

#[test]
fn same_seed_same_grain() {
    let src = ramp(16, 16);
    let params = ParameterSet::neutral().with(Param::Noise, 0.6);
    let mut a = seeded();
    let mut b = seeded();
    a.render(&src, geom(&src), &params, RenderQuality::Full)
        .unwrap();
    b.render(&src, geom(&src), &params, RenderQuality::Full)
        .unwrap();
    assert_eq!(a.output(), b.output());
    assert_ne!(a.output().unwrap(), src.raster());
}

#[test]
fn working_buffers_are_reused_across_frames() {
    let src = ramp(24, 24);
    let params = ParameterSet::neutral().with(Param::Exposure, 0.5);
    let mut p = seeded();
    for _ in 0..3 {
        p.render(&src, geom(&src), &params, RenderQuality::Full)
            .unwrap();
    }
    let st = p.pool_stats();
    assert_eq!(st.alloc_buffers, 1);
    assert_eq!(st.reused_buffers, 2);
}

#[test]
fn invalidate_drops_output_and_cache() {
    let src = ramp(10, 10);
    let mut p = seeded();
    p.render(&src, geom(&src), &ParameterSet::neutral(), RenderQuality::Full)
        .unwrap();
    p.invalidate_source();
    assert!(p.output().is_none());
    assert!(p.scaled_sources.is_empty());
    assert_eq!(p.pool_stats().retained_buffers, 0);
}

#[test]
fn large_source_is_downscaled_to_geometry() {
    let src = SourceImage::new(Raster::filled(3200, 100, [50, 60, 70, 255]));
    let g = geom(&src);
    assert_eq!((g.width, g.height), (1600, 50));
    let mut p = seeded();
    p.render(&src, g, &ParameterSet::neutral(), RenderQuality::Full)
        .unwrap();
    let out = p.output().unwrap();
    assert_eq!(out.dims(), (1600, 50));
    assert_eq!(out.pixel(800, 25), Some([50, 60, 70, 255]));
}
