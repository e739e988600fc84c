use super::*;

#[test]
fn canvas_keeps_nine_by_sixteen() {
    let c = CanvasSize::for_width(1000).unwrap();
    assert_eq!(c, CanvasSize::default());
    assert_eq!(c.height, 1778);

    let c = CanvasSize::for_width(450).unwrap();
    assert_eq!(c.height, 800);
    assert!((c.scale() - 0.45).abs() < 1e-12);

    assert!(CanvasSize::for_width(0).is_err());
    assert!(CanvasSize::for_width(40_000).is_err());
}

#[test]
fn lat_lon_parts_require_both_halves() {
    assert_eq!(
        LatLon::from_parts(Some(34.05), Some(-118.25)),
        Some(LatLon::new(34.05, -118.25))
    );
    assert_eq!(LatLon::from_parts(Some(34.05), None), None);
    assert_eq!(LatLon::new(1.0, 2.0).to_lon_lat(), [2.0, 1.0]);
}
