//! Outbound response delivery.
//!
//! Takes an AI response of any size and shape and delivers it through a
//! transport with a hard per-message limit, without breaking code fences.
//! The module follows hexagonal architecture:
//!
//! - Pure segmenting, splitting, and unit types in [`domain`]
//! - Transport, artifact storage, and cleanup reporting contracts in [`ports`]
//! - In-memory, filesystem, and tracing implementations in [`adapters`]
//! - Code block placement, sequencing, and the pipeline entry point in
//!   [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
