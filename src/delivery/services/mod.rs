//! Application services for response delivery.
//!
//! [`ResponseDeliveryService`] is the entry point: it segments a response,
//! splits prose, places code blocks, and drives the transport through the
//! [`DeliverySequencer`].

mod code_policy;
mod error;
mod janitor;
mod pipeline;
mod sequencer;

pub use code_policy::{ATTACHMENT_PLACEHOLDER, CodeBlockPolicy};
pub use error::{DeliveryError, DeliveryResult, DeliveryStage, UnitFailure};
pub use janitor::ArtifactJanitor;
pub use pipeline::{DeliveryReport, PreparedResponse, ResponseDeliveryService};
pub use sequencer::DeliverySequencer;
