//! # Response Envelope Parser
//!
//! Decodes a raw reply into one of two shapes:
//!
//! - **Acknowledged**: `{"message":{"status":"ok"}}`, the bug-report receipt.
//!   A `status` field ends parsing; nothing else in the message is read.
//! - **Full**: `{"message":{"version":3,"authentication":{..},..}}`. The version
//!   must equal the request's and `authentication` must be an object. Every
//!   other sub-object is extracted on its own and dropped with a log line when
//!   it is absent or not an object.
//!
//! Any failure of a mandatory field rejects the whole reply.

use crate::core::keys::{ResponseKey, AUTHENTICATION, MESSAGE, STATUS, VERSION};
use crate::core::serialization::parse_document;
use crate::error::{constants, ProtocolError, Result};
use crate::protocol::sub_object::SubObject;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

/// Bug-report acknowledgment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugAck {
    pub status: String,
}

/// Reply carrying the mandatory version and authentication plus any optional
/// sub-objects the server chose to include
#[derive(Debug, Clone, PartialEq)]
pub struct FullResponse {
    pub version: i64,
    pub authentication: SubObject,
    pub bluetooth: Option<SubObject>,
    pub location: Option<SubObject>,
    pub certificate: Option<SubObject>,
    pub revocation: Option<SubObject>,
    pub follower: Option<SubObject>,
    pub notification: Option<SubObject>,
}

impl FullResponse {
    pub fn get(&self, key: ResponseKey) -> Option<&SubObject> {
        match key {
            ResponseKey::Bluetooth => self.bluetooth.as_ref(),
            ResponseKey::Location => self.location.as_ref(),
            ResponseKey::Certificate => self.certificate.as_ref(),
            ResponseKey::Revocation => self.revocation.as_ref(),
            ResponseKey::Follower => self.follower.as_ref(),
            ResponseKey::Notification => self.notification.as_ref(),
        }
    }

    /// Optional keys this reply did not carry
    pub fn absent(&self) -> Vec<ResponseKey> {
        ResponseKey::OPTIONAL
            .into_iter()
            .filter(|key| self.get(*key).is_none())
            .collect()
    }
}

/// A decoded reply
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Acknowledged(BugAck),
    Full(FullResponse),
}

/// Which shape a successful reply had
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Acknowledged,
    Full,
}

impl Response {
    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Acknowledged(_) => ResponseKind::Acknowledged,
            Response::Full(_) => ResponseKind::Full,
        }
    }

    /// Status string of a bug-report acknowledgment
    pub fn bug_status(&self) -> Result<&str> {
        match self {
            Response::Acknowledged(ack) => Ok(&ack.status),
            Response::Full(_) => Err(ProtocolError::FieldNotAvailable(STATUS)),
        }
    }

    pub fn version(&self) -> Result<i64> {
        match self {
            Response::Full(full) => Ok(full.version),
            Response::Acknowledged(_) => Err(ProtocolError::FieldNotAvailable(VERSION)),
        }
    }

    pub fn authentication(&self) -> Result<&SubObject> {
        match self {
            Response::Full(full) => Ok(&full.authentication),
            Response::Acknowledged(_) => Err(ProtocolError::FieldNotAvailable(AUTHENTICATION)),
        }
    }

    /// An optional sub-object, if this reply carried it
    pub fn optional(&self, key: ResponseKey) -> Result<&SubObject> {
        let value = match self {
            Response::Full(full) => full.get(key),
            Response::Acknowledged(_) => None,
        };
        value.ok_or(ProtocolError::FieldNotAvailable(key.name()))
    }
}

/// Decodes replies to a request sent with `expected_version`
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser {
    expected_version: i64,
}

impl ResponseParser {
    pub fn new(expected_version: i64) -> Self {
        Self { expected_version }
    }

    pub fn expected_version(&self) -> i64 {
        self.expected_version
    }

    /// Decode a raw reply body
    pub fn disassemble(&self, raw: &str) -> Result<Response> {
        let document = parse_document(raw)?;

        let message = match document.get(MESSAGE) {
            Some(Value::Object(message)) => message,
            Some(_) => {
                return Err(ProtocolError::MalformedResponse(
                    constants::ERR_MESSAGE_NOT_OBJECT.to_string(),
                ))
            }
            None => {
                return Err(ProtocolError::MalformedResponse(
                    constants::ERR_MISSING_MESSAGE.to_string(),
                ))
            }
        };

        if let Some(status) = message.get(STATUS).map(status_text) {
            debug!(status = %status, "Bug report acknowledged");
            return Ok(Response::Acknowledged(BugAck { status }));
        }

        let version = self.check_version(message)?;

        let authentication = match message.get(AUTHENTICATION) {
            Some(value @ Value::Object(_)) => SubObject::new(value.clone()),
            _ => {
                error!("Authentication failed");
                return Err(ProtocolError::AuthenticationFailed);
            }
        };

        Ok(Response::Full(FullResponse {
            version,
            authentication,
            bluetooth: extract_optional(message, ResponseKey::Bluetooth),
            location: extract_optional(message, ResponseKey::Location),
            certificate: extract_optional(message, ResponseKey::Certificate),
            revocation: extract_optional(message, ResponseKey::Revocation),
            follower: extract_optional(message, ResponseKey::Follower),
            notification: extract_optional(message, ResponseKey::Notification),
        }))
    }

    fn check_version(&self, message: &Map<String, Value>) -> Result<i64> {
        let raw = message.get(VERSION).ok_or_else(|| {
            ProtocolError::MalformedResponse(constants::ERR_MISSING_VERSION.to_string())
        })?;
        let actual = integer_value(raw).ok_or_else(|| {
            ProtocolError::MalformedResponse(constants::ERR_VERSION_NOT_INTEGER.to_string())
        })?;

        if actual != i128::from(self.expected_version) {
            // Versions outside the i64 range are reported saturated.
            let actual = i64::try_from(actual)
                .unwrap_or(if actual < 0 { i64::MIN } else { i64::MAX });
            warn!(
                expected = self.expected_version,
                actual, "Protocol version mismatch"
            );
            return Err(ProtocolError::VersionMismatch {
                expected: self.expected_version,
                actual,
            });
        }
        Ok(self.expected_version)
    }
}

/// Any present status is an acknowledgment. Strings are taken as-is, every
/// other value as its JSON text.
fn status_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integers, integral floats and numeric strings all count as integers.
/// Widened so that integral values beyond `i64` still compare as a mismatch.
fn integer_value(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i128)
            }),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

fn extract_optional(message: &Map<String, Value>, key: ResponseKey) -> Option<SubObject> {
    match message.get(key.name()) {
        Some(value @ Value::Object(_)) => Some(SubObject::new(value.clone())),
        Some(_) => {
            debug!(key = %key, "Ignoring non-object sub-object");
            None
        }
        None => {
            debug!(key = %key, "No sub-object");
            None
        }
    }
}
