//! # Client Services
//!
//! The round-trip orchestrator and its async adapter.

pub mod async_client;
pub mod client;

pub use async_client::send_detached;
pub use client::EnvelopeClient;
