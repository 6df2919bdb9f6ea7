//! # HTTP Transport
//!
//! Blocking HTTP POST transport for the coordination server.
//!
//! The request body is the form-encoded `message` field. Timeouts come from
//! [`ClientConfig`]: `connect_timeout` bounds connection setup and
//! `read_timeout` bounds the whole exchange, which is the only way to cancel
//! a round trip.
//!
//! ## Error Mapping
//! - connect failures and timeouts -> `ConnectionFailed`
//! - any other HTTP-level failure, oversized or non-UTF-8 bodies -> `ProtocolViolation`
//! - zero-length bodies -> `EmptyResponse`
//!
//! Non-2xx statuses are logged and their body is still returned; the parser
//! decides whether it is a usable reply.

use std::io::{self, Read};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::core::serialization::FormBody;
use crate::error::{constants, ProtocolError, Result};
use crate::transport::Transport;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    max_response_size: usize,
}

impl HttpTransport {
    /// Build a transport honoring the timeouts in `config`.
    ///
    /// The blocking client panics when built or dropped inside a tokio
    /// runtime. Build it outside async code or inside `spawn_blocking`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_response_size: config.max_response_size,
        })
    }

    /// Wrap an existing client, e.g. one sharing a connection pool
    pub fn with_client(client: Client, max_response_size: usize) -> Self {
        Self {
            client,
            max_response_size,
        }
    }

    fn oversized(&self, size: u64) -> bool {
        size > self.max_response_size as u64
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    fn post_form(&self, address: &str, body: &FormBody) -> Result<String> {
        let encoded = body.to_urlencoded()?;

        let response = self
            .client
            .post(address)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encoded)
            .send()
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Server replied with non-success status");
        }

        if let Some(length) = response.content_length() {
            if self.oversized(length) {
                return Err(ProtocolError::ProtocolViolation(format!(
                    "{}: {length} bytes",
                    constants::ERR_RESPONSE_TOO_LARGE
                )));
            }
        }

        // Bodies without a Content-Length are capped while reading.
        let mut bytes = Vec::new();
        response
            .take(self.max_response_size as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(map_read_error)?;
        if self.oversized(bytes.len() as u64) {
            return Err(ProtocolError::ProtocolViolation(format!(
                "{}: {} bytes",
                constants::ERR_RESPONSE_TOO_LARGE,
                bytes.len()
            )));
        }
        if bytes.is_empty() {
            return Err(ProtocolError::EmptyResponse);
        }

        debug!(%status, bytes = bytes.len(), "Received reply");
        String::from_utf8(bytes)
            .map_err(|_| ProtocolError::ProtocolViolation(constants::ERR_BODY_NOT_UTF8.to_string()))
    }
}

fn map_request_error(error: reqwest::Error) -> ProtocolError {
    if error.is_connect() || error.is_timeout() {
        ProtocolError::ConnectionFailed(error.to_string())
    } else {
        ProtocolError::ProtocolViolation(error.to_string())
    }
}

fn map_read_error(error: io::Error) -> ProtocolError {
    if error.kind() == io::ErrorKind::TimedOut {
        ProtocolError::ConnectionFailed(error.to_string())
    } else {
        ProtocolError::ProtocolViolation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::expect_used)]
    fn test_builds_from_default_config() {
        let transport = HttpTransport::new(&ClientConfig::default()).expect("client");
        assert_eq!(transport.max_response_size, crate::config::MAX_RESPONSE_SIZE);
        assert!(transport.oversized(crate::config::MAX_RESPONSE_SIZE as u64 + 1));
        assert!(!transport.oversized(0));
    }
}
