use super::*;
use crate::assets::decode::PreparedImage;
use crate::assets::template::LogSheetTemplate;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::TriplogError;
use crate::logsheet::renderer::RenderOpts;

const TRIP_JSON: &str = include_str!("../../fixtures/trip.json");

fn renderer() -> LogSheetRenderer {
    let template = LogSheetTemplate::from_image(PreparedImage {
        width: 9,
        height: 16,
        rgba8_premul: std::sync::Arc::new(vec![255; 9 * 16 * 4]),
    });
    let opts = RenderOpts {
        canvas: CanvasSize::for_width(90).unwrap(),
        ..RenderOpts::default()
    };
    LogSheetRenderer::without_text(&template, opts).unwrap()
}

fn trip() -> Trip {
    Trip::from_json_str(TRIP_JSON).unwrap()
}

#[test]
fn navigation_wraps_both_ways() {
    let mut v = LogSheetViewer::new();
    assert_eq!(v.load(&mut renderer(), &trip()), &ViewerState::Ready(0));
    assert_eq!(v.position(), Some((0, 5)));

    assert_eq!(v.previous(), Some(4));
    assert_eq!(v.current().map(|i| i.index()), Some(4));
    assert_eq!(v.next(), Some(0));
    for expected in [1, 2, 3, 4, 0] {
        assert_eq!(v.next(), Some(expected));
    }
}

#[test]
fn navigation_is_a_no_op_until_ready() {
    let mut v = LogSheetViewer::new();
    assert_eq!(v.state(), &ViewerState::Loading);
    assert_eq!(v.next(), None);
    assert_eq!(v.previous(), None);
    assert!(v.current().is_none());
}

#[test]
fn empty_trip_is_empty_state() {
    let mut t = trip();
    t.logs.clear();
    let mut v = LogSheetViewer::new();
    assert_eq!(v.load(&mut renderer(), &t), &ViewerState::Empty);
    assert_eq!(v.next(), None);
}

#[test]
fn missing_coordinates_keep_loading() {
    let mut t = trip();
    t.end_lat = None;
    let mut v = LogSheetViewer::new();
    assert_eq!(v.load(&mut renderer(), &t), &ViewerState::Loading);
}

#[test]
fn render_failure_is_reported() {
    let mut v = LogSheetViewer::new();
    let g = v.begin_load();
    assert!(v.finish_load(Tagged::new(
        g,
        Err(TriplogError::validation("bad date"))
    )));
    assert_eq!(
        v.state(),
        &ViewerState::Failed("validation error: bad date".to_string())
    );
}

#[test]
fn stale_completion_is_discarded() {
    let mut r = renderer();
    let mut v = LogSheetViewer::new();

    let old = v.begin_load();
    let old_set = r.render_all_daily_logs(&trip());
    let new = v.begin_load();

    assert!(!v.finish_load(Tagged::new(old, old_set)));
    assert_eq!(v.state(), &ViewerState::Loading);

    let mut short = trip();
    short.logs.truncate(2);
    assert!(v.finish_load(Tagged::new(new, r.render_all_daily_logs(&short))));
    assert_eq!(v.position(), Some((0, 2)));
}
