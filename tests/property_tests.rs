//! Property-based tests using proptest
//!
//! Envelope invariants over arbitrary sets of sub-objects and arbitrary
//! reply content.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::{json, Value};
use tds_envelope::prelude::*;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z0-9:]{0,12}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn sub_object() -> impl Strategy<Value = SubObject> {
    prop::collection::btree_map("[a-z_]{1,8}", leaf(), 0..4).prop_map(|fields| {
        SubObject::new(Value::Object(fields.into_iter().collect()))
    })
}

fn optional_keys() -> Vec<RequestKey> {
    RequestKey::ALL
        .into_iter()
        .filter(|k| !k.is_mandatory())
        .collect()
}

proptest! {
    // Property: assembly succeeds exactly when both mandatory fields are set
    #[test]
    fn prop_assembly_requires_mandatory_fields(
        version in prop::option::of(1i64..100),
        authentication in prop::option::of(sub_object()),
        optional in prop::collection::vec(prop::option::of(sub_object()), 7),
    ) {
        let mut request = RequestEnvelope::new();
        if let Some(v) = version {
            request.set_version(v);
        }
        if let Some(a) = authentication.clone() {
            request.set_authentication(a);
        }
        for (key, value) in optional_keys().into_iter().zip(optional) {
            request.collect(key, &value);
        }

        match request.assemble() {
            Ok(_) => prop_assert!(version.is_some() && authentication.is_some()),
            Err(ProtocolError::MissingMandatoryField(_)) => {
                prop_assert!(version.is_none() || authentication.is_none())
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}

proptest! {
    // Property: assembling the same set twice yields byte-identical bodies,
    // whatever order the setters ran in
    #[test]
    fn prop_serialization_deterministic(
        authentication in sub_object(),
        values in prop::collection::vec(sub_object(), 7),
        reversed in any::<bool>(),
    ) {
        let pairs: Vec<_> = optional_keys().into_iter().zip(values).collect();

        let mut forward = RequestEnvelope::new();
        forward.set_version(3).set_authentication(authentication.clone());
        for (key, value) in &pairs {
            forward.set(*key, value.clone()).unwrap();
        }

        let mut other = RequestEnvelope::new();
        let mut ordered = pairs.clone();
        if reversed {
            ordered.reverse();
        }
        for (key, value) in &ordered {
            other.set(*key, value.clone()).unwrap();
        }
        other.set_authentication(authentication).set_version(3);

        let a = forward.assemble().unwrap().to_form_body().unwrap();
        let b = other.assemble().unwrap().to_form_body().unwrap();
        let c = forward.assemble().unwrap().to_form_body().unwrap();
        prop_assert_eq!(a.document(), b.document());
        prop_assert_eq!(a.to_urlencoded().unwrap(), c.to_urlencoded().unwrap());
    }
}

proptest! {
    // Property: a status field wins over anything else in the message
    #[test]
    fn prop_status_short_circuits(
        status in "[a-zA-Z ]{0,16}",
        noise in prop::collection::btree_map("[a-z]{1,8}", leaf(), 0..6),
    ) {
        let mut message: serde_json::Map<String, Value> = noise.into_iter().collect();
        message.insert("status".to_string(), Value::from(status.clone()));
        let raw = json!({ "message": message }).to_string();

        let response = ResponseParser::new(3).disassemble(&raw).unwrap();
        prop_assert_eq!(response.bug_status().unwrap(), status.as_str());
        prop_assert!(response.authentication().is_err());
        for key in ResponseKey::OPTIONAL {
            prop_assert!(response.optional(key).is_err());
        }
    }
}

proptest! {
    // Property: any version other than the expected one is rejected
    #[test]
    fn prop_version_mismatch_rejected(expected in 1i64..50, actual in 1i64..50) {
        prop_assume!(expected != actual);
        let raw = json!({
            "message": {
                "version": actual,
                "authentication": {},
                "follower": {"last_update": 1}
            }
        })
        .to_string();

        let result = ResponseParser::new(expected).disassemble(&raw);
        let is_mismatch = matches!(
            result,
            Err(ProtocolError::VersionMismatch { expected: e, actual: a }) if e == expected && a == actual
        );
        prop_assert!(is_mismatch);
    }
}

proptest! {
    // Property: the parser never panics on arbitrary input
    #[test]
    fn prop_parser_total(raw in ".{0,256}") {
        let _ = ResponseParser::new(3).disassemble(&raw);
    }
}
