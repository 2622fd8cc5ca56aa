use climacheck_core::errors::*;

#[test]
fn sub_errors_convert_into_umbrella() {
    let err: ClimacheckError = ValidationError::EmptyInput {
        what: "evaluation pairs".to_string(),
    }
    .into();
    assert!(matches!(err, ClimacheckError::ValidationError(_)));
    assert_eq!(err.to_string(), "validation error: empty input: evaluation pairs");

    let err: ClimacheckError = RemoteServiceError::RequestFailed {
        service: "embeddings".to_string(),
        reason: "timeout".to_string(),
    }
    .into();
    assert!(err.to_string().contains("embeddings request failed: timeout"));
}

#[test]
fn serde_and_io_errors_convert() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ClimacheckError = serde_err.into();
    assert!(matches!(err, ClimacheckError::SerializationError(_)));

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: ClimacheckError = io_err.into();
    assert!(matches!(err, ClimacheckError::Io(_)));
}

#[test]
fn length_mismatch_message_names_both_sides() {
    let err = ValidationError::LengthMismatch {
        left_name: "gold entries".to_string(),
        left: 3,
        right_name: "retrieval results".to_string(),
        right: 2,
    };
    assert_eq!(
        err.to_string(),
        "length mismatch: gold entries has 3 items, retrieval results has 2"
    );
}
