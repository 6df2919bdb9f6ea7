//! Typed views of response sub-objects.
//!
//! Views are decoded on demand from the opaque sub-object. A view that does
//! not match never invalidates the reply it came from; the accessor reports
//! `InvalidField` instead.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `authentication` reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticationReply {
    #[serde(deserialize_with = "string_or_number")]
    pub twitter_id: String,
}

/// `bluetooth` reply: MAC addresses of peers the server knows about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BluetoothReply {
    #[serde(default)]
    pub neighbors: Vec<String>,
}

/// `location` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LocationReply {
    pub status: i64,
}

/// `certificate` reply. `certificate` is absent when the request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CertificateReply {
    #[serde(default)]
    pub certificate: Option<String>,
    pub status: i64,
}

/// One revoked certificate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RevocationListEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub serial: String,
    pub until: i64,
}

/// `revocation` reply: list entries newer than the queried version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RevocationReply {
    pub version: i64,
    #[serde(default)]
    pub list: Vec<RevocationListEntry>,
}

/// A follower's public key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FollowerKey {
    #[serde(deserialize_with = "string_or_number")]
    pub twitter_id: String,
    pub key: String,
}

/// `follower` reply: keys changed since the queried update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FollowerReply {
    pub last_update: i64,
    #[serde(default)]
    pub followers: Vec<FollowerKey>,
}

// Servers send numeric identifiers either quoted or bare.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    #[allow(clippy::expect_used)]
    fn test_numeric_identifiers() {
        let reply: FollowerReply = serde_json::from_value(json!({
            "last_update": 1700000000,
            "followers": [
                {"twitter_id": 12345, "key": "-----BEGIN PUBLIC KEY-----"},
                {"twitter_id": "678", "key": "k2"}
            ]
        }))
        .expect("decode");
        assert_eq!(reply.followers[0].twitter_id, "12345");
        assert_eq!(reply.followers[1].twitter_id, "678");
    }

    #[test]
    fn test_identifier_rejects_objects() {
        let result: Result<AuthenticationReply, _> =
            serde_json::from_value(json!({"twitter_id": {"id": 1}}));
        assert!(result.is_err());
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_missing_lists_default_empty() {
        let reply: RevocationReply =
            serde_json::from_value(json!({"version": 7})).expect("decode");
        assert!(reply.list.is_empty());
        let reply: BluetoothReply = serde_json::from_value(json!({})).expect("decode");
        assert!(reply.neighbors.is_empty());
    }
}
