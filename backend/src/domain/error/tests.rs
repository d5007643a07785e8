//! Tests for domain error construction and serialisation.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InvalidRequest, message);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("  ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn no_trace_id_outside_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn captures_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_envelope() {
    let error = Error::invalid_request("bad latitude")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "latitude" }));

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad latitude",
            "traceId": TRACE_ID,
            "details": { "field": "latitude" },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("gone")).expect("error serialises");
    assert_eq!(value, json!({ "code": "not_found", "message": "gone" }));
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "internal_error", "message": "" }));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(trace_id: TraceId) {
    let error: Error = TraceId::scope(trace_id, async {
        serde_json::from_value(json!({ "code": "not_found", "message": "gone" }))
            .expect("payload is valid")
    })
    .await;
    assert!(error.trace_id().is_none());
}

#[rstest]
fn without_details_clears_payload() {
    let error = Error::internal("boom")
        .with_details(json!({ "store": "connection refused" }))
        .without_details();
    assert!(error.details().is_none());
    assert_eq!(error.message(), "boom");
}
