use super::*;

const TRIP_JSON: &str = include_str!("../../fixtures/trip.json");

#[test]
fn parses_store_payload() {
    let trip = Trip::from_json_str(TRIP_JSON).unwrap();
    assert_eq!(trip.id, Some(7));
    assert_eq!(trip.driver_name, "Sam Ortega");
    assert_eq!(trip.stops.len(), 2);
    assert_eq!(trip.stops[0].stop_type, StopKind::Fuel);
    assert_eq!(trip.stops[1].stop_type, StopKind::Rest);
    assert_eq!(trip.logs.len(), 5);
    assert_eq!(trip.current(), None);
    assert_eq!(
        trip.start_date(),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );
}

#[test]
fn route_endpoints_require_start_and_end() {
    let mut trip = Trip::from_json_str(TRIP_JSON).unwrap();
    let (start, end) = trip.route_endpoints().unwrap();
    assert_eq!(start, LatLon::new(34.05, -118.25));
    assert_eq!(end, LatLon::new(36.16, -115.15));
    assert!(trip.is_ready());

    trip.end_lon = None;
    let err = trip.route_endpoints().unwrap_err();
    assert!(err.is_not_ready());
    assert!(!trip.is_ready());
}

#[test]
fn missing_buckets_default_to_zero() {
    let entry: DailyLogEntry =
        serde_json::from_str(r#"{ "date": "2025-01-02", "driving_hours": 5.5 }"#).unwrap();
    assert_eq!(entry.off_duty_hours, 0.0);
    assert_eq!(entry.driving_hours, 5.5);
    assert_eq!(entry.total_hours(), 5.5);
}

#[test]
fn totals_sum_every_bucket() {
    let entry = DailyLogEntry {
        date: "2025-03-01".to_string(),
        off_duty_hours: 8.0,
        sleeper_berth_hours: 8.0,
        driving_hours: 4.0,
        on_duty_hours: 4.0,
    };
    assert_eq!(entry.total_hours(), 24.0);
    assert_eq!(entry.worked_hours(), 8.0);
    assert_eq!(entry.hours(DutyStatus::SleeperBerth), 8.0);
}

#[test]
fn log_date_must_be_iso_day() {
    let mut entry = DailyLogEntry {
        date: "2025-03-01".to_string(),
        off_duty_hours: 0.0,
        sleeper_berth_hours: 0.0,
        driving_hours: 0.0,
        on_duty_hours: 0.0,
    };
    assert_eq!(
        entry.parse_date().unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );

    entry.date = "03/01/2025".to_string();
    assert!(matches!(
        entry.parse_date(),
        Err(TriplogError::Validation(_))
    ));
}

#[test]
fn unknown_stop_category_is_rejected() {
    let json = TRIP_JSON.replace("\"fuel\"", "\"scenic\"");
    assert!(matches!(
        Trip::from_json_str(&json),
        Err(TriplogError::Serde(_))
    ));
}
