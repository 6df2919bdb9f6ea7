//! # Envelope Protocol
//!
//! Request assembly and response disassembly for one round trip.
//!
//! ## Components
//! - **Sub-objects**: opaque structured values and their producers
//! - **Request**: the envelope builder, failing closed on missing mandatory fields
//! - **Response**: the two-shape reply parser
//! - **Payloads**: typed views of response sub-objects

pub mod payloads;
pub mod request;
pub mod response;
pub mod sub_object;
