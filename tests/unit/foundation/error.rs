use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TriplogError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TriplogError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        TriplogError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(
        TriplogError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TriplogError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn distance_limit_is_recognised_by_code_or_message() {
    let by_code = TriplogError::RouteService {
        status: 400,
        code: Some(2004),
        message: "Request parameters exceed the server configuration limits.".to_string(),
    };
    assert!(by_code.is_distance_limit());

    let by_message = TriplogError::RouteService {
        status: 400,
        code: None,
        message: "The approximated route distance must not be greater than 6000000.0 meters."
            .to_string(),
    };
    assert!(by_message.is_distance_limit());

    let other = TriplogError::RouteService {
        status: 403,
        code: None,
        message: "Access to this API has been disallowed".to_string(),
    };
    assert!(!other.is_distance_limit());
    assert!(!TriplogError::network("refused").is_distance_limit());
}

#[test]
fn network_and_distance_limit_share_user_message() {
    let limit = TriplogError::RouteService {
        status: 400,
        code: Some(2004),
        message: "limits".to_string(),
    };
    assert_eq!(limit.user_message(), ROUTE_LIMIT_MESSAGE);
    assert_eq!(
        TriplogError::network("connection reset").user_message(),
        ROUTE_LIMIT_MESSAGE
    );

    let forbidden = TriplogError::RouteService {
        status: 403,
        code: None,
        message: "Access to this API has been disallowed".to_string(),
    };
    assert_eq!(
        forbidden.user_message(),
        "Access to this API has been disallowed"
    );
}

#[test]
fn missing_coordinate_is_not_ready() {
    assert!(TriplogError::missing_coordinate("start").is_not_ready());
    assert!(!TriplogError::validation("x").is_not_ready());
}
