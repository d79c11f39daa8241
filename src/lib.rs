//! Chatrelay: delivery of AI responses to chat platforms.
//!
//! This crate turns one raw model response into the ordered series of
//! platform-sized messages a chat bot sends, moving oversized code blocks into
//! file attachments and pacing the sends.
//!
//! # Architecture
//!
//! Chatrelay follows hexagonal architecture principles:
//!
//! - **Domain**: Pure segmenting, splitting, and configuration logic
//! - **Ports**: Abstract trait interfaces for the chat platform and artifact
//!   storage
//! - **Adapters**: Concrete implementations of ports (filesystem, in-memory,
//!   tracing)
//!
//! # Modules
//!
//! - [`delivery`]: Response segmentation, code block placement, and ordered
//!   delivery

pub mod delivery;
