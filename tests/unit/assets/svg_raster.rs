use super::*;

#[test]
fn stretch_scale_maps_source_onto_target() {
    let (sx, sy) = stretch_scale(90.0, 160.0, 180, 320).unwrap();
    assert!((sx - 2.0).abs() < 1e-6);
    assert!((sy - 2.0).abs() < 1e-6);

    let (sx, sy) = stretch_scale(100.0, 100.0, 90, 160).unwrap();
    assert!((sx - 0.9).abs() < 1e-6);
    assert!((sy - 1.6).abs() < 1e-6);
}

#[test]
fn degenerate_source_size_is_rejected() {
    for (w, h) in [(90.0, 0.0), (0.0, 160.0), (90.0, -1.0), (f32::NAN, 160.0), (90.0, f32::INFINITY)] {
        let err = stretch_scale(w, h, 90, 160).unwrap_err();
        assert!(matches!(err, TriplogError::AssetLoad(_)), "{w}x{h}: {err:?}");
    }
}

#[test]
fn oversized_target_is_a_render_error() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
    let tree = crate::assets::decode::parse_svg(svg).unwrap();
    let err = rasterize_svg_to_premul_rgba8(&tree, MAX_DIM + 1, 10).unwrap_err();
    assert!(matches!(err, TriplogError::Render(_)));
}
