use super::*;
use rstest::rstest;

#[rstest]
#[case(ErrorKind::NoTenant, 401, "NO_TENANT")]
#[case(ErrorKind::AccessDenied, 403, "ACCESS_DENIED")]
#[case(ErrorKind::NotFound, 404, "NOT_FOUND")]
#[case(ErrorKind::Rejected, 400, "REJECTED")]
#[case(ErrorKind::Conflict, 409, "CONFLICT")]
#[case(ErrorKind::Busy, 503, "STORE_BUSY")]
#[case(ErrorKind::Storage, 500, "STORAGE_ERROR")]
fn test_kind_status_and_code(#[case] kind: ErrorKind, #[case] status: u16, #[case] code: &str) {
    let err = AppError::new(kind, "x");
    assert_eq!(err.status_code(), status);
    assert_eq!(err.kind().as_str(), code);
}

#[test]
fn test_display_prefixes_code() {
    let err = AppError::new(ErrorKind::Conflict, "username already taken");
    assert_eq!(err.to_string(), "CONFLICT: username already taken");
    assert_eq!(err.message(), "username already taken");
}

#[test]
fn test_only_busy_is_retryable() {
    assert!(AppError::new(ErrorKind::Busy, "").is_retryable());
    assert!(!AppError::new(ErrorKind::Storage, "").is_retryable());
    assert!(!AppError::new(ErrorKind::Conflict, "").is_retryable());
}
