//! Adapter implementations for response delivery ports.

pub mod filesystem;
pub mod memory;
pub mod tracing_observer;
