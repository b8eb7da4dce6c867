use crate::error::{ScrollError, ErrorContext};
use crate::scroll_error;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found"
    ));

    let scroll_result = result.context("Failed to read users file");
    match scroll_result {
        Err(ScrollError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read users file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected ScrollError::Unknown"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    match option.context("No element") {
        Err(ScrollError::Unknown(msg)) => assert_eq!(msg, "No element"),
        _ => panic!("Expected ScrollError::Unknown"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied"
    ));

    let scroll_result = result.with_context(|| {
        format!("Failed to load users from {}", "/tmp/users.json")
    });

    match scroll_result {
        Err(ScrollError::Unknown(msg)) => {
            assert!(msg.contains("/tmp/users.json"));
            assert!(msg.contains("access denied"));
        }
        _ => panic!("Expected ScrollError::Unknown"),
    }
}

#[test]
fn test_scroll_error_macro() {
    let error = scroll_error!(Lifecycle, "already mounted");
    match error {
        ScrollError::Lifecycle(msg) => assert_eq!(msg, "already mounted"),
        _ => panic!("Expected ScrollError::Lifecycle"),
    }

    let error = scroll_error!(InvalidInput, "bad threshold: {}", 1.5);
    match error {
        ScrollError::InvalidInput(msg) => assert_eq!(msg, "bad threshold: 1.5"),
        _ => panic!("Expected ScrollError::InvalidInput"),
    }
}

#[test]
fn test_unresolved_target_message() {
    let message = ScrollError::UnresolvedTarget.to_string();
    assert!(message.contains("not resolved"));
}

#[test]
fn test_json_error_converts() {
    let parsed: Result<serde_json::Value, _> = serde_json::from_str("{");
    let error: ScrollError = parsed.unwrap_err().into();
    assert!(matches!(error, ScrollError::Json(_)));
}
