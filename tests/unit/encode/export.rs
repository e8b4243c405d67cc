use super::*;

#[test]
fn default_is_quality_90_jpeg() {
    let opts = ExportOpts::default();
    assert_eq!(opts.format, ExportFormat::Jpeg { quality: 90 });
    assert_eq!(opts.format.file_name(), "deep-fried.jpg");
    assert_eq!(ExportFormat::Png.file_name(), "deep-fried.png");
    assert_eq!(ExportFormat::Png.mime_type(), "image/png");
}

#[test]
fn zero_area_surface_is_skipped() {
    let out = export_surface(&Raster::new(0, 12), ExportOpts::default()).unwrap();
    assert_eq!(out, ExportOutcome::Skipped(ExportNotice::EmptySurface));
    assert!(out.encoded().is_none());
}

#[test]
fn jpeg_round_trips_dimensions() {
    let surface = Raster::filled(9, 5, [200, 40, 10, 255]);
    let out = export_surface(&surface, ExportOpts::default()).unwrap();
    let img = out.encoded().unwrap();
    assert_eq!((img.width, img.height), (9, 5));
    assert_eq!(&img.bytes[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (9, 5));
    let p = decoded.get_pixel(4, 2);
    assert!((i32::from(p[0]) - 200).abs() <= 6, "{p:?}");
}

#[test]
fn png_keeps_alpha_exactly() {
    let surface = Raster::filled(2, 2, [10, 20, 30, 77]);
    let out = export_surface(
        &surface,
        ExportOpts {
            format: ExportFormat::Png,
        },
    )
    .unwrap();
    let img = out.encoded().unwrap();
    let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.into_raw(), surface.data());
}

#[test]
fn jpeg_flattens_alpha_over_black() {
    assert_eq!(
        flatten_over_black(&[255, 128, 0, 0, 255, 255, 255, 255]),
        vec![0, 0, 0, 255, 255, 255]
    );
}

#[test]
fn write_to_uses_fixed_file_name() {
    let dir = std::env::temp_dir().join(format!("deepfry_export_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let surface = Raster::filled(3, 3, [1, 2, 3, 255]);
    let out = export_surface(&surface, ExportOpts::default()).unwrap();
    let path = out.encoded().unwrap().write_to(&dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "deep-fried.jpg");
    assert!(path.exists());
    std::fs::remove_dir_all(&dir).unwrap();
}
