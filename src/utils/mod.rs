//! # Utility Modules
//!
//! Supporting utilities for logging and observability.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` installation from [`LoggingConfig`](crate::config::LoggingConfig)
//! - **Metrics**: thread-safe round-trip counters

pub mod logging;
pub mod metrics;

pub use metrics::{Metrics, MetricsSnapshot};
