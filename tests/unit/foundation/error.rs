use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MergeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MergeError::decode("x").to_string().contains("decode error:"));
    assert!(
        MergeError::precondition("x")
            .to_string()
            .contains("composition precondition failed:")
    );
    assert!(MergeError::backend("x").to_string().contains("backend error:"));
    assert!(
        MergeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MergeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn backend_failures_collapse_to_generic_notification() {
    let err = MergeError::backend("ffmpeg exited with status 1: Invalid filtergraph");
    assert_eq!(err.user_message(), COMPOSITION_FAILED_MESSAGE);
}

#[test]
fn precondition_notification_names_the_missing_input() {
    let err = MergeError::precondition("no video or image track to map as [v0]");
    let msg = err.user_message();
    assert!(msg.starts_with(COMPOSITION_FAILED_MESSAGE));
    assert!(msg.contains("[v0]"));
}
