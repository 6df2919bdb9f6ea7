//! Opaque sub-objects and the producers that supply them.
//!
//! The envelope only ever knows a sub-object's key and whether it is present.
//! Its inner fields belong to whoever produced it.

use crate::error::{ProtocolError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A structured value stored under one envelope key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubObject(Value);

impl SubObject {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An object with no fields
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Bluetooth peer announcement for the given MAC address
    pub fn bluetooth_peer(mac: &str) -> Self {
        Self(json!({ "mac": mac }))
    }

    /// Bug report carrying a free-text description and a numeric type
    pub fn bug_report(description: &str, kind: i64) -> Self {
        Self(json!({ "description": description, "type": kind }))
    }

    /// Revocation-list query from the locally known list version
    pub fn revocation_query(current_version: i64) -> Self {
        Self(json!({ "version": current_version }))
    }

    /// Follower delta query since the given update timestamp
    pub fn follower_query(last_update: i64) -> Self {
        Self(json!({ "last_update": last_update }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Look up a named field of an object-shaped sub-object
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Decode the sub-object into a typed view.
    ///
    /// `field` names the envelope key in the resulting error.
    pub fn decode<T: DeserializeOwned>(&self, field: &'static str) -> Result<T> {
        T::deserialize(&self.0).map_err(|e| ProtocolError::InvalidField {
            field,
            reason: e.to_string(),
        })
    }
}

impl From<Value> for SubObject {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Map<String, Value>> for SubObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

/// Source of one optional request sub-object.
///
/// `produce` folds the "has a value?" check and the read into one call.
pub trait SubObjectProducer {
    fn produce(&self) -> Option<SubObject>;
}

impl SubObjectProducer for SubObject {
    fn produce(&self) -> Option<SubObject> {
        Some(self.clone())
    }
}

impl SubObjectProducer for Option<SubObject> {
    fn produce(&self) -> Option<SubObject> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Query {
        last_update: i64,
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_decode_typed_view() {
        let query: Query = SubObject::follower_query(42)
            .decode("follower")
            .expect("decode");
        assert_eq!(query.last_update, 42);
    }

    #[test]
    fn test_decode_shape_mismatch_names_field() {
        let err = SubObject::new(json!([1, 2])).decode::<Query>("follower");
        match err {
            Err(ProtocolError::InvalidField { field, .. }) => assert_eq!(field, "follower"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            SubObject::bug_report("crash", 2).as_value(),
            &json!({"description": "crash", "type": 2})
        );
        assert_eq!(SubObject::bluetooth_peer("00:11").get("mac"), Some(&json!("00:11")));
        assert!(SubObject::empty().is_object());
    }

    #[test]
    fn test_option_producer() {
        let absent: Option<SubObject> = None;
        assert!(absent.produce().is_none());
        assert!(Some(SubObject::empty()).produce().is_some());
    }
}
