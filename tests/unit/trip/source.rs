use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const TRIP_JSON: &str = include_str!("../../fixtures/trip.json");

#[test]
fn trip_url_tolerates_trailing_slash() {
    let a = HttpTripSource::with_client(reqwest::Client::new(), "http://store.local/");
    let b = HttpTripSource::with_client(reqwest::Client::new(), "http://store.local");
    assert_eq!(a.trip_url(3), "http://store.local/trips/3/");
    assert_eq!(a.trip_url(3), b.trip_url(3));
}

#[tokio::test]
async fn fetches_and_parses_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TRIP_JSON, "application/json"))
        .mount(&server)
        .await;

    let source = HttpTripSource::new(server.uri(), Duration::from_secs(5)).unwrap();
    let trip = source.fetch_trip(7).await.unwrap();
    assert_eq!(trip.driver_name, "Sam Ortega");
    assert_eq!(trip.logs.len(), 5);
}

#[tokio::test]
async fn missing_trip_is_a_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/99/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpTripSource::new(server.uri(), Duration::from_secs(5)).unwrap();
    let err = source.fetch_trip(99).await.unwrap_err();
    assert!(matches!(err, TriplogError::Validation(_)));
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"driver_name\": 3}"))
        .mount(&server)
        .await;

    let source = HttpTripSource::new(server.uri(), Duration::from_secs(5)).unwrap();
    let err = source.fetch_trip(1).await.unwrap_err();
    assert!(matches!(err, TriplogError::Decode(_)));
}
