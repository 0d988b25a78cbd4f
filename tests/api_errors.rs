use roster::api::ApiError;

#[test]
fn status_classification_covers_the_known_codes() {
    assert_eq!(
        ApiError::from_status(400, "bad"),
        ApiError::InvalidInput("bad".to_string())
    );
    assert_eq!(
        ApiError::from_status(422, "bad"),
        ApiError::InvalidInput("bad".to_string())
    );
    assert_eq!(
        ApiError::from_status(401, "who"),
        ApiError::Unauthorized("who".to_string())
    );
    assert_eq!(
        ApiError::from_status(403, "no"),
        ApiError::Forbidden("no".to_string())
    );
    assert_eq!(
        ApiError::from_status(404, "gone"),
        ApiError::NotFound("gone".to_string())
    );
    assert_eq!(
        ApiError::from_status(409, "dup"),
        ApiError::Conflict("dup".to_string())
    );
}

#[test]
fn every_5xx_maps_to_server_error_with_its_status() {
    for status in [500, 502, 503, 599] {
        assert_eq!(
            ApiError::from_status(status, "boom"),
            ApiError::ServerError {
                status,
                message: "boom".to_string()
            }
        );
    }
}

#[test]
fn unrecognized_statuses_stay_unknown() {
    assert_eq!(
        ApiError::from_status(418, "teapot"),
        ApiError::Unknown {
            status: 418,
            message: "teapot".to_string()
        }
    );
    assert_eq!(
        ApiError::from_status(301, "moved"),
        ApiError::Unknown {
            status: 301,
            message: "moved".to_string()
        }
    );
}

#[test]
fn only_transport_and_5xx_failures_are_retryable() {
    assert!(ApiError::Unavailable("timeout".to_string()).is_retryable());
    assert!(ApiError::from_status(503, "busy").is_retryable());

    assert!(!ApiError::from_status(400, "bad").is_retryable());
    assert!(!ApiError::from_status(404, "gone").is_retryable());
    assert!(!ApiError::from_status(409, "dup").is_retryable());
    assert!(!ApiError::from_status(418, "teapot").is_retryable());
}

#[test]
fn display_messages_name_the_kind() {
    assert_eq!(
        ApiError::Unavailable("timed out".to_string()).to_string(),
        "service unavailable: timed out"
    );
    assert_eq!(
        ApiError::from_status(404, "no such user").to_string(),
        "not found: no such user"
    );
    assert_eq!(
        ApiError::from_status(500, "oops").to_string(),
        "server error (500): oops"
    );
}
