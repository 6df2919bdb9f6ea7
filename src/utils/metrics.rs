//! Round-trip metrics
//!
//! Atomic counters describing how round trips ended. A client records into
//! its own [`Metrics`]; several clients may share one through an `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ProtocolError;
use crate::protocol::response::Response;

/// Metrics collector for envelope round trips
#[derive(Debug)]
pub struct Metrics {
    /// Round trips started
    pub round_trips_total: AtomicU64,
    /// Round trips that produced a usable reply
    pub round_trips_success: AtomicU64,
    /// Round trips that failed at any stage
    pub round_trips_failed: AtomicU64,
    /// Replies that were bug-report acknowledgments
    pub acknowledgments: AtomicU64,
    /// Requests rejected before transmission
    pub assembly_errors: AtomicU64,
    /// Transport-level failures
    pub transport_errors: AtomicU64,
    /// Replies rejected while decoding
    pub parse_errors: AtomicU64,
    /// Replies rejected for a protocol version mismatch
    pub version_mismatches: AtomicU64,
    /// Optional response sub-objects that were not present
    pub optional_fields_absent: AtomicU64,
    /// Total request bytes sent
    pub bytes_sent: AtomicU64,
    /// Total reply bytes received
    pub bytes_received: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            round_trips_total: AtomicU64::new(0),
            round_trips_success: AtomicU64::new(0),
            round_trips_failed: AtomicU64::new(0),
            acknowledgments: AtomicU64::new(0),
            assembly_errors: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            parse_errors: AtomicU64::new(0),
            version_mismatches: AtomicU64::new(0),
            optional_fields_absent: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record the start of a round trip
    pub fn round_trip_started(&self) {
        self.round_trips_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request body handed to the transport
    pub fn request_sent(&self, byte_count: u64) {
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a reply body returned by the transport
    pub fn reply_received(&self, byte_count: u64) {
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a decoded reply
    pub fn round_trip_succeeded(&self, response: &Response) {
        self.round_trips_success.fetch_add(1, Ordering::Relaxed);
        match response {
            Response::Acknowledged(_) => {
                self.acknowledgments.fetch_add(1, Ordering::Relaxed);
            }
            Response::Full(full) => {
                self.optional_fields_absent
                    .fetch_add(full.absent().len() as u64, Ordering::Relaxed);
            }
        }
    }

    /// Record a failed round trip, classified by its error
    pub fn round_trip_failed(&self, error: &ProtocolError) {
        self.round_trips_failed.fetch_add(1, Ordering::Relaxed);
        match error {
            ProtocolError::MissingMandatoryField(_) | ProtocolError::SerializeError(_) => {
                self.assembly_errors.fetch_add(1, Ordering::Relaxed);
            }
            ProtocolError::VersionMismatch { .. } => {
                self.version_mismatches.fetch_add(1, Ordering::Relaxed);
                self.parse_errors.fetch_add(1, Ordering::Relaxed);
            }
            e if e.is_transport() => {
                self.transport_errors.fetch_add(1, Ordering::Relaxed);
            }
            e if e.is_terminal_parse() => {
                self.parse_errors.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            round_trips_total: self.round_trips_total.load(Ordering::Relaxed),
            round_trips_success: self.round_trips_success.load(Ordering::Relaxed),
            round_trips_failed: self.round_trips_failed.load(Ordering::Relaxed),
            acknowledgments: self.acknowledgments.load(Ordering::Relaxed),
            assembly_errors: self.assembly_errors.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            version_mismatches: self.version_mismatches.load(Ordering::Relaxed),
            optional_fields_absent: self.optional_fields_absent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            round_trips_total = snapshot.round_trips_total,
            round_trips_success = snapshot.round_trips_success,
            round_trips_failed = snapshot.round_trips_failed,
            acknowledgments = snapshot.acknowledgments,
            assembly_errors = snapshot.assembly_errors,
            transport_errors = snapshot.transport_errors,
            parse_errors = snapshot.parse_errors,
            version_mismatches = snapshot.version_mismatches,
            optional_fields_absent = snapshot.optional_fields_absent,
            bytes_sent = snapshot.bytes_sent,
            bytes_received = snapshot.bytes_received,
            uptime_seconds = snapshot.uptime_seconds,
            "Envelope metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub round_trips_total: u64,
    pub round_trips_success: u64,
    pub round_trips_failed: u64,
    pub acknowledgments: u64,
    pub assembly_errors: u64,
    pub transport_errors: u64,
    pub parse_errors: u64,
    pub version_mismatches: u64,
    pub optional_fields_absent: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub uptime_seconds: u64,
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}
