//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(DomainError::auth_failure("nope"), ErrorCode::AuthFailure)]
#[case(DomainError::session_expired("stale"), ErrorCode::SessionExpired)]
#[case(DomainError::session_ended("gone"), ErrorCode::SessionEnded)]
#[case(DomainError::fetch_failure("down"), ErrorCode::FetchFailure)]
#[case(DomainError::storage_failure("disk"), ErrorCode::StorageFailure)]
fn constructors_set_code(#[case] err: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(
        result,
        Err(DomainErrorValidationError::EmptyMessage)
    ));
}

#[rstest]
fn new_substitutes_default_message_for_blank_input() {
    let err = DomainError::new(ErrorCode::AuthFailure, "");
    assert_eq!(err.message(), "login failed");
}

#[rstest]
fn serialises_with_snake_case_code() {
    let err = DomainError::fetch_failure("catalogue unavailable");
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "fetch_failure", "message": "catalogue unavailable" })
    );
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result: Result<DomainError, _> =
        serde_json::from_value(json!({ "code": "fetch_failure", "message": " " }));
    assert!(result.is_err());
}
