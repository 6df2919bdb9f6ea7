//! # tds-envelope
//!
//! Client side of the envelope protocol spoken with a disaster coordination
//! server over an intermittent connection.
//!
//! One round trip is one blocking HTTP POST:
//!
//! 1. [`RequestEnvelope`](protocol::request::RequestEnvelope) collects the
//!    mandatory `version` and `authentication` plus any optional sub-objects
//!    and assembles them in a fixed key order.
//! 2. A [`Transport`](transport::Transport) posts the document as the form
//!    field `message` and returns the raw reply.
//! 3. [`ResponseParser`](protocol::response::ResponseParser) decodes the reply
//!    into a bug-report acknowledgment or a full response whose optional
//!    sub-objects are each allowed to be missing.
//!
//! [`EnvelopeClient`](service::client::EnvelopeClient) runs the three steps
//! and exposes typed accessors for the decoded reply.
//!
//! ## Modules
//! - [`config`]: client and logging configuration
//! - [`core`]: key taxonomy and wire serialization
//! - [`protocol`]: request builder, response parser, typed views
//! - [`transport`]: transport trait and the HTTP implementation
//! - [`service`]: the round-trip orchestrator and its async adapter
//! - [`utils`]: logging setup and metrics

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod utils;

/// Commonly used types
pub mod prelude {
    pub use crate::config::{ClientConfig, LoggingConfig, ProtocolConfig, PROTOCOL_VERSION};
    pub use crate::core::keys::{RequestKey, ResponseKey};
    pub use crate::core::serialization::FormBody;
    pub use crate::error::{ProtocolError, Result};
    pub use crate::protocol::request::{Envelope, RequestEnvelope};
    pub use crate::protocol::response::{Response, ResponseKind, ResponseParser};
    pub use crate::protocol::sub_object::{SubObject, SubObjectProducer};
    pub use crate::service::client::EnvelopeClient;
    pub use crate::transport::http::HttpTransport;
    pub use crate::transport::Transport;
}
