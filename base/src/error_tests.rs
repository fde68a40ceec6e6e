use crate::err;
use crate::error::{ErrorKind, PathportError, PathportResult, ResultExt};
use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

#[test]
fn test_error_from_io_error() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let path = PathBuf::from("test.txt");
    let kind = ErrorKind::Io {
        path: path.clone(),
        source: io_err,
    };
    let error = PathportError::new(kind);

    match error.kind() {
        ErrorKind::Io { path: p, .. } => {
            assert_eq!(p, &path);
        }
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_error_from_message() {
    let error = PathportError::message("something went wrong");

    match error.kind() {
        ErrorKind::Message { message } => {
            assert_eq!(message, "something went wrong");
        }
        _ => panic!("Expected Message variant"),
    }
}

#[test]
fn test_err_macro() {
    let error = err!("widening failed for {}", "some/path");
    assert_eq!(error.to_string(), "widening failed for some/path");
}

#[test]
fn test_error_context_attachment() {
    let error = PathportError::message("original error")
        .context("first context")
        .context("second context");

    assert_eq!(
        error.to_string(),
        "first context: second context: original error"
    );
}

#[test]
fn test_error_display_message_only() {
    let error = PathportError::message("test message");
    assert_eq!(error.to_string(), "test message");
}

#[test]
fn test_error_display_io_error() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
    let error = PathportError::io("/tmp/test.txt", io_err);
    let display = error.to_string();
    assert!(display.contains("/tmp/test.txt"));
    assert!(display.contains("not found"));
}

#[test]
fn test_error_display_encoding_with_os_code() {
    let error = PathportError::encoding("conversion produced no output", Some(87));
    let display = error.to_string();
    assert!(display.contains("conversion produced no output"));
    assert!(display.contains("87"));
}

#[test]
fn test_error_category_not_found() {
    let error = PathportError::io(
        "missing.txt",
        io::Error::from_raw_os_error(not_found_code()),
    );
    assert!(error.is_not_found());
    assert!(!error.is_access_denied());
    assert!(!error.is_already_exists());
    assert_eq!(error.os_error(), Some(not_found_code()));
}

#[test]
fn test_error_category_already_exists() {
    let error = PathportError::io(
        "existing.txt",
        io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
    );
    assert!(error.is_already_exists());
    assert!(!error.is_not_found());
}

#[test]
fn test_error_category_access_denied() {
    let error = PathportError::io(
        "protected.txt",
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(error.is_access_denied());
}

#[test]
fn test_encoding_error_has_no_io_category() {
    let error = PathportError::encoding("bad input", None);
    assert!(error.is_encoding());
    assert!(!error.is_not_found());
    assert_eq!(error.os_error(), None);
}

#[test]
fn test_error_source_io() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
    let error = PathportError::io("test.txt", io_err);
    assert!(error.source().is_some());
}

#[test]
fn test_error_source_message() {
    let error = PathportError::message("test");
    assert!(error.source().is_none());
}

#[test]
fn test_error_root_cause_io() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
    let error = PathportError::io("test.txt", io_err);
    let root = error.root_cause();
    assert_eq!(root.to_string(), "not found");
}

#[test]
fn test_result_ext_context_success() {
    let result: PathportResult<i32> = Ok(42);
    let final_result = result.context("operation failed");
    assert_eq!(final_result.unwrap(), 42);
}

#[test]
fn test_result_ext_context_error() {
    let result: PathportResult<i32> = Err(Box::new(PathportError::message("original")));
    let final_result = result.context("operation failed");
    let err = final_result.unwrap_err();
    assert_eq!(err.to_string(), "operation failed: original");
}

#[test]
fn test_result_ext_with_context_error() {
    let result: PathportResult<i32> = Err(Box::new(PathportError::message("original")));
    let final_result = result.with_context(|| "lazy context".to_string());
    let err = final_result.unwrap_err();
    assert_eq!(err.to_string(), "lazy context: original");
}

#[test]
fn test_result_ext_chaining() {
    let result: PathportResult<i32> = Err(Box::new(PathportError::message("root")));
    let final_result = result
        .context("step 1")
        .context("step 2")
        .with_context(|| "step 3".to_string());
    let err = final_result.unwrap_err();
    assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
}

fn not_found_code() -> i32 {
    // ENOENT and ERROR_FILE_NOT_FOUND are both 2.
    2
}
