//! # Envelope Serialization
//!
//! Converts assembled envelopes to the text document sent on the wire and
//! parses reply bodies back into document trees.
//!
//! The request document travels as the value of a single form field named
//! `message`. The document itself is compact JSON; key order is whatever the
//! envelope serializer emits, so identical envelopes yield identical bytes.
//!
//! ## Usage
//! ```ignore
//! let body = FormBody::from_document(&envelope)?;
//! let encoded = body.to_urlencoded()?; // message=%7B%22version%22%3A3...
//! ```

use crate::config::MESSAGE_FIELD;
use crate::error::{constants, ProtocolError, Result};
use serde::Serialize;
use serde_json::Value;

/// The form-encoded request body: one `message` field holding the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBody {
    document: String,
}

impl FormBody {
    /// Serialize any envelope-shaped value into the `message` field
    pub fn from_document<T: Serialize>(document: &T) -> Result<Self> {
        let document = serde_json::to_string(document)
            .map_err(|e| ProtocolError::SerializeError(e.to_string()))?;
        Ok(Self { document })
    }

    /// Name of the form field
    pub fn field(&self) -> &'static str {
        MESSAGE_FIELD
    }

    /// The textual document carried in the field
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Field/value pairs, ready for a form encoder
    pub fn pairs(&self) -> [(&'static str, &str); 1] {
        [(MESSAGE_FIELD, self.document.as_str())]
    }

    /// `application/x-www-form-urlencoded` rendering of the body
    pub fn to_urlencoded(&self) -> Result<String> {
        serde_urlencoded::to_string(&self.pairs()[..])
            .map_err(|e| ProtocolError::SerializeError(e.to_string()))
    }

    /// Size of the document in bytes
    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }
}

/// Parse a raw reply body into a document tree
pub fn parse_document(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| {
        ProtocolError::MalformedResponse(format!("{}: {e}", constants::ERR_NOT_A_DOCUMENT))
    })
}
