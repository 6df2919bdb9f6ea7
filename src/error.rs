//! # Error Types
//!
//! Error handling for the envelope protocol.
//!
//! Every failure of a round trip maps onto one [`ProtocolError`] variant, from
//! request assembly through the transport to response decoding.
//!
//! ## Error Categories
//! - **Assembly**: a mandatory request field was never set
//! - **Transport**: connection failures, protocol violations, empty replies
//! - **Response**: malformed documents, version mismatches, failed authentication
//! - **Access**: a response field that this round trip never populated
//!
//! Optional sub-objects never produce an error while parsing. They are logged
//! and left out of the decoded response instead.
//!
//! ## Example Usage
//! ```rust
//! use tds_envelope::error::{ProtocolError, Result};
//! use tracing::{error, info};
//!
//! fn check_version(expected: i64, actual: i64) -> Result<()> {
//!     if expected != actual {
//!         return Err(ProtocolError::VersionMismatch { expected, actual });
//!     }
//!     Ok(())
//! }
//!
//! match check_version(3, 4) {
//!     Ok(()) => info!("versions agree"),
//!     Err(e) => error!(error = %e, "round trip rejected"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Response document errors
    pub const ERR_NOT_A_DOCUMENT: &str = "Response is not a structured document";
    pub const ERR_MISSING_MESSAGE: &str = "Response lacks the message wrapper";
    pub const ERR_MESSAGE_NOT_OBJECT: &str = "Response message is not an object";
    pub const ERR_MISSING_VERSION: &str = "Response lacks a version field";
    pub const ERR_VERSION_NOT_INTEGER: &str = "Response version is not an integer";

    /// Transport errors
    pub const ERR_RESPONSE_TOO_LARGE: &str = "Response body exceeds maximum size";
    pub const ERR_BODY_NOT_UTF8: &str = "Response body is not valid UTF-8";

    /// Async wrapper errors
    pub const ERR_BLOCKING_TASK: &str = "Blocking round trip task failed";
}

/// ProtocolError is the primary error type for all envelope operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Missing mandatory field: {0}")]
    MissingMandatoryField(&'static str),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: i64, actual: i64 },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Field not available: {0}")]
    FieldNotAvailable(&'static str),

    #[error("Invalid {field} field: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

impl ProtocolError {
    /// True for failures raised by the transport adapter.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ProtocolError::ConnectionFailed(_)
                | ProtocolError::ProtocolViolation(_)
                | ProtocolError::EmptyResponse
        )
    }

    /// True for failures that rejected the whole reply while decoding it.
    pub fn is_terminal_parse(&self) -> bool {
        matches!(
            self,
            ProtocolError::MalformedResponse(_)
                | ProtocolError::VersionMismatch { .. }
                | ProtocolError::AuthenticationFailed
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
