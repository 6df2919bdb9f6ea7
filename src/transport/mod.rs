//! # Transport Layer
//!
//! The transport performs exactly one blocking POST per round trip and hands
//! back the raw reply body. It never retries; retry and backoff belong to the
//! caller.
//!
//! ## Implementations
//! - **HTTP**: `reqwest` blocking client with connect and read timeouts

use crate::core::serialization::FormBody;
use crate::error::Result;
use std::sync::Arc;

pub mod http;

/// A blocking request/response channel to the coordination server
pub trait Transport {
    /// POST `body` to `address` and return the reply text.
    ///
    /// Fails with `ConnectionFailed`, `ProtocolViolation` or `EmptyResponse`.
    fn post_form(&self, address: &str, body: &FormBody) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(&self, address: &str, body: &FormBody) -> Result<String> {
        (**self).post_form(address, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_form(&self, address: &str, body: &FormBody) -> Result<String> {
        (**self).post_form(address, body)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post_form(&self, address: &str, body: &FormBody) -> Result<String> {
        (**self).post_form(address, body)
    }
}
