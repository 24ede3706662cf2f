//! Tests for the domain error payload and reason table.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(ReasonCode::NoActiveSession, "ATHR-001", ErrorCode::Unauthorized)]
#[case(ReasonCode::SignedOut, "ATHR-002", ErrorCode::Unauthorized)]
#[case(ReasonCode::NotPermitted, "ATHR-003", ErrorCode::Forbidden)]
#[case(ReasonCode::AnswerNotFound, "ANS-001", ErrorCode::NotFound)]
#[case(ReasonCode::QuestionNotFound, "QUES-001", ErrorCode::NotFound)]
#[case(ReasonCode::UserNotFound, "USR-001", ErrorCode::NotFound)]
#[case(ReasonCode::UsernameTaken, "SGR-001", ErrorCode::Conflict)]
#[case(ReasonCode::EmailRegistered, "SGR-002", ErrorCode::Conflict)]
#[case(ReasonCode::UnknownUsername, "ATH-001", ErrorCode::Unauthorized)]
#[case(ReasonCode::PasswordMismatch, "ATH-002", ErrorCode::Unauthorized)]
fn reason_codes_are_stable(
    #[case] reason: ReasonCode,
    #[case] wire: &str,
    #[case] category: ErrorCode,
) {
    assert_eq!(reason.as_str(), wire);
    assert_eq!(reason.category(), category);
    let serialised = serde_json::to_value(reason).expect("serialise reason");
    assert_eq!(serialised, json!(wire));
}

#[rstest]
fn rejected_errors_serialise_reason_and_category() {
    let err = Error::rejected(ReasonCode::QuestionNotFound, "Entered question uuid does not exist");
    let value = serde_json::to_value(&err).expect("serialise error");

    assert_eq!(value["code"], json!("not_found"));
    assert_eq!(value["reason"], json!("QUES-001"));
    assert_eq!(value["message"], json!("Entered question uuid does not exist"));
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
fn plain_errors_omit_reason() {
    let err = Error::invalid_request("content must not be empty");
    let value = serde_json::to_value(&err).expect("serialise error");
    assert!(value.get("reason").is_none());
    assert_eq!(err.to_string(), "content must not be empty");
}

#[rstest]
fn display_prefixes_reason_code() {
    let err = Error::rejected(ReasonCode::SignedOut, "User is signed out");
    assert_eq!(err.to_string(), "ATHR-002: User is signed out");
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id = TraceId::generate();
    let err = TraceId::scope(trace_id, async { Error::forbidden("nope") }).await;
    assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
fn round_trips_through_json() {
    let err = Error::conflict("taken")
        .with_trace_id("abc")
        .with_details(json!({ "field": "username" }));
    let encoded = serde_json::to_string(&err).expect("encode");
    let decoded: Error = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(decoded, err);
}
