//! # Core Protocol Components
//!
//! Key taxonomy and wire serialization shared by requests and responses.
//!
//! ## Components
//! - **Keys**: literal sub-object names and their fixed request order
//! - **Serialization**: the form-encoded `message` body sent to the server
//!
//! ## Wire Format
//! ```text
//! POST <server>
//! Content-Type: application/x-www-form-urlencoded
//!
//! message=<url-encoded JSON envelope>
//! ```

pub mod keys;
pub mod serialization;
