use super::*;

const TRIP_JSON: &str = include_str!("../../fixtures/trip.json");

fn renderer() -> LogSheetRenderer {
    let template = LogSheetTemplate::from_image(PreparedImage {
        width: 9,
        height: 16,
        rgba8_premul: std::sync::Arc::new(vec![255; 9 * 16 * 4]),
    });
    let opts = RenderOpts {
        canvas: CanvasSize::for_width(180).unwrap(),
        ..RenderOpts::default()
    };
    LogSheetRenderer::without_text(&template, opts).unwrap()
}

#[test]
fn renders_one_png_per_log_in_order() {
    let trip = Trip::from_json_str(TRIP_JSON).unwrap();
    let set = renderer().render_all_daily_logs(&trip).unwrap();

    assert_eq!(set.len(), 5);
    let indices: Vec<usize> = set.iter().map(|i| i.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(
        set.get(2).unwrap().date(),
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    );
    for img in set.iter() {
        assert_eq!(img.size(), (180, 320));
        assert!(img.png_bytes().starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}

#[test]
fn png_decodes_back_to_canvas_size() {
    let trip = Trip::from_json_str(TRIP_JSON).unwrap();
    let img = renderer().render_daily_log(&trip, 0).unwrap();
    let decoded = image::load_from_memory(img.png_bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (180, 320));
}

#[test]
fn export_names_follow_trip_start() {
    let trip = Trip::from_json_str(TRIP_JSON).unwrap();
    let img = renderer().render_daily_log(&trip, 3).unwrap();

    assert_eq!(img.download_file_name(), "trip_log_2025-03-01_day_4.png");
    let uri = img.to_data_uri();
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn export_name_keeps_the_recorded_start_date() {
    let mut trip = Trip::from_json_str(TRIP_JSON).unwrap();
    trip.start_time = chrono::DateTime::parse_from_rfc3339("2025-03-01T20:30:00-05:00").unwrap();
    let img = renderer().render_daily_log(&trip, 0).unwrap();

    assert_eq!(img.download_file_name(), "trip_log_2025-03-01_day_1.png");
}

#[test]
fn out_of_range_index_is_rejected() {
    let trip = Trip::from_json_str(TRIP_JSON).unwrap();
    let err = renderer().render_daily_log(&trip, 5).unwrap_err();
    assert!(matches!(err, TriplogError::Validation(_)));
}

#[test]
fn trip_without_endpoints_is_not_ready() {
    let mut trip = Trip::from_json_str(TRIP_JSON).unwrap();
    trip.start_lat = None;
    let err = renderer().render_all_daily_logs(&trip).unwrap_err();
    assert!(err.is_not_ready());
}

#[test]
fn one_bad_entry_aborts_the_set() {
    let mut trip = Trip::from_json_str(TRIP_JSON).unwrap();
    trip.logs[3].date = "not a date".to_string();
    let err = renderer().render_all_daily_logs(&trip).unwrap_err();
    assert!(matches!(err, TriplogError::Validation(_)));
}

#[test]
fn empty_logs_render_an_empty_set() {
    let mut trip = Trip::from_json_str(TRIP_JSON).unwrap();
    trip.logs.clear();
    let set = renderer().render_all_daily_logs(&trip).unwrap();
    assert!(set.is_empty());
}

#[test]
fn writes_png_under_download_name() {
    let trip = Trip::from_json_str(TRIP_JSON).unwrap();
    let img = renderer().render_daily_log(&trip, 0).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = img.write_to_dir(dir.path()).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("trip_log_2025-03-01_day_1.png")
    );
    assert_eq!(std::fs::read(&path).unwrap(), img.png_bytes());
}
