use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BoardError::export("x").to_string().contains("export error:"));
    assert!(
        BoardError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        BoardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn export_and_save_failures_are_retryable() {
    assert!(BoardError::export("encoder died").is_retryable());
    assert!(BoardError::persistence("offline").is_retryable());
    assert!(!BoardError::validation("fps").is_retryable());
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: BoardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, BoardError::Serde(_)));
}
