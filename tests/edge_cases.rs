#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge cases of reply decoding and request encoding
//! Boundary values, odd-but-legal documents, and shapes servers get wrong

use serde_json::json;
use tds_envelope::prelude::*;

// ============================================================================
// REPLY DOCUMENT EDGE CASES
// ============================================================================

#[test]
fn test_status_alongside_full_fields_is_still_an_ack() {
    let raw = json!({
        "message": {
            "status": "ok",
            "version": 3,
            "authentication": {"twitter_id": "1"},
            "follower": {"last_update": 1}
        }
    })
    .to_string();
    let response = ResponseParser::new(3).disassemble(&raw).unwrap();
    assert_eq!(response.kind(), ResponseKind::Acknowledged);
    assert!(response.optional(ResponseKey::Follower).is_err());
}

#[test]
fn test_numeric_status_is_read_as_text() {
    let response = ResponseParser::new(3)
        .disassemble(r#"{"message":{"status":200}}"#)
        .unwrap();
    assert_eq!(response.bug_status().unwrap(), "200");
}

#[test]
fn test_quoted_version_is_accepted() {
    let response = ResponseParser::new(3)
        .disassemble(r#"{"message":{"version":"3","authentication":{}}}"#)
        .unwrap();
    assert_eq!(response.version().unwrap(), 3);
}

#[test]
fn test_fractional_version_is_malformed() {
    assert!(matches!(
        ResponseParser::new(3).disassemble(r#"{"message":{"version":3.5,"authentication":{}}}"#),
        Err(ProtocolError::MalformedResponse(_))
    ));
}

#[test]
fn test_version_checked_before_authentication() {
    // A mismatched version wins even when authentication is also missing.
    assert!(matches!(
        ResponseParser::new(3).disassemble(r#"{"message":{"version":2}}"#),
        Err(ProtocolError::VersionMismatch { .. })
    ));
}

#[test]
fn test_null_optional_field_is_absent() {
    let response = ResponseParser::new(3)
        .disassemble(r#"{"message":{"version":3,"authentication":{},"certificate":null}}"#)
        .unwrap();
    assert!(matches!(
        response.optional(ResponseKey::Certificate),
        Err(ProtocolError::FieldNotAvailable("certificate"))
    ));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let response = ResponseParser::new(3)
        .disassemble(r#"{"message":{"version":3,"authentication":{},"weather":{"wind":9}},"extra":1}"#)
        .unwrap();
    assert_eq!(response.kind(), ResponseKind::Full);
}

#[test]
fn test_unicode_survives_decoding() {
    let response = ResponseParser::new(3)
        .disassemble(r#"{"message":{"version":3,"authentication":{},"notification":{"text":"Évacuation 避難"}}}"#)
        .unwrap();
    assert_eq!(
        response
            .optional(ResponseKey::Notification)
            .unwrap()
            .get("text"),
        Some(&json!("Évacuation 避難"))
    );
}

#[test]
fn test_truncated_document_is_malformed() {
    assert!(matches!(
        ResponseParser::new(3).disassemble(r#"{"message":{"version":3,"authen"#),
        Err(ProtocolError::MalformedResponse(_))
    ));
}

// ============================================================================
// REQUEST ENCODING EDGE CASES
// ============================================================================

#[test]
fn test_form_encoding_escapes_reserved_characters() {
    let mut request = RequestEnvelope::new();
    request
        .set_version(3)
        .set_authentication(SubObject::new(json!({"secret": "a&b=c d+é"})));
    let body = request.assemble().unwrap().to_form_body().unwrap();
    let encoded = body.to_urlencoded().unwrap();

    assert!(encoded.starts_with("message="));
    assert_eq!(encoded.matches('=').count(), 1);
    assert!(!encoded.contains('&'));

    let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&encoded).unwrap();
    assert_eq!(decoded[0].1, body.document());
}

#[test]
fn test_empty_authentication_object_is_still_present() {
    let mut request = RequestEnvelope::new();
    request.set_version(1).set_authentication(SubObject::empty());
    let body = request.assemble().unwrap().to_form_body().unwrap();
    assert_eq!(body.document(), r#"{"version":1,"authentication":{}}"#);
}
