use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::foundation::error::ROUTE_LIMIT_MESSAGE;
use crate::route::waypoint::WaypointRole;

fn waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint {
            role: WaypointRole::Start,
            lat: Some(34.05),
            lon: Some(-118.25),
        },
        Waypoint {
            role: WaypointRole::End,
            lat: Some(36.16),
            lon: Some(-115.15),
        },
    ]
}

async fn client_for(server: &MockServer) -> OrsDirectionsClient {
    OrsDirectionsClient::new(
        format!("{}/v2/directions/driving-hgv", server.uri()),
        "test-key",
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn posts_lon_lat_pairs_and_decodes_geometry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv"))
        .and(header("authorization", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "coordinates": [[-118.25, 34.05], [-115.15, 36.16]],
            "format": "geojson",
            "instructions": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "routes": [{ "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let path = client_for(&server).await.route(&waypoints()).await.unwrap();
    assert_eq!(path.points.len(), 3);
    assert!((path.points[2].lon - -126.453).abs() < 1e-9);
}

#[tokio::test]
async fn distance_limit_is_recognised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 2004,
                "message": "Request parameters exceed the server configuration limits. The approximated route distance must not be greater than 6000000.0 meters."
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .route(&waypoints())
        .await
        .unwrap_err();
    assert!(err.is_distance_limit());
    assert!(matches!(
        err,
        TriplogError::RouteService {
            status: 400,
            code: Some(2004),
            ..
        }
    ));
    assert_eq!(err.user_message(), ROUTE_LIMIT_MESSAGE);
}

#[tokio::test]
async fn other_rejections_keep_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({ "error": "Access to this API has been disallowed" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .route(&waypoints())
        .await
        .unwrap_err();
    assert!(!err.is_distance_limit());
    assert_eq!(err.user_message(), "Access to this API has been disallowed");
}

#[tokio::test]
async fn empty_routes_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "routes": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .route(&waypoints())
        .await
        .unwrap_err();
    assert!(matches!(err, TriplogError::Decode(_)));
}

#[tokio::test]
async fn geojson_geometry_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "routes": [{ "geometry": { "type": "LineString", "coordinates": [[-118.25, 34.05], [-115.15, 36.16]] } }]
        })))
        .mount(&server)
        .await;

    let path = client_for(&server).await.route(&waypoints()).await.unwrap();
    assert_eq!(path.points, vec![LatLon::new(34.05, -118.25), LatLon::new(36.16, -115.15)]);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;
    drop(server);

    let err = client.route(&waypoints()).await.unwrap_err();
    assert!(matches!(err, TriplogError::Network(_)));
    assert_eq!(err.user_message(), ROUTE_LIMIT_MESSAGE);
}

#[test]
fn route_path_exports_linestring() {
    let p = RoutePath {
        points: vec![LatLon::new(1.0, 2.0)],
    };
    assert_eq!(
        p.to_geojson(),
        serde_json::json!({ "type": "LineString", "coordinates": [[2.0, 1.0]] })
    );
}

fn route_service_parts(err: TriplogError) -> (u16, Option<i64>, String) {
    match err {
        TriplogError::RouteService {
            status,
            code,
            message,
        } => (status, code, message),
        other => panic!("expected RouteService, got {other:?}"),
    }
}

#[test]
fn rejection_keeps_status_when_body_is_unreadable() {
    assert_eq!(
        route_service_parts(rejection(502, Err("connection reset"))),
        (502, None, "body unreadable: connection reset".to_string())
    );
    assert_eq!(
        route_service_parts(rejection(503, Ok(b""))).2,
        "directions service returned HTTP 503"
    );
    assert_eq!(
        route_service_parts(rejection(400, Ok(br#"{"error":{"code":2004,"message":"too far"}}"#))),
        (400, Some(2004), "too far".to_string())
    );
}
