//! Domain model for response delivery.
//!
//! Everything here is synchronous and free of I/O: segmenting a response,
//! splitting prose, and describing the units and artifacts handed to the
//! transport.

mod artifact;
mod config;
mod error;
mod sanitize;
mod segment;
mod segmenter;
mod splitter;
mod unit;

pub use artifact::{
    Artifact, ArtifactId, ArtifactSource, code_artifact_description, code_artifact_filename,
    extension_for_language,
};
pub use config::{DISCORD_MAX_LENGTH, DeliveryConfig, FailurePolicy, MIN_MAX_LENGTH};
pub use error::ConfigError;
pub use sanitize::sanitize_content;
pub use segment::{CodeSegment, Segment, TextSegment};
pub use segmenter::{FENCE, rejoin, segment};
pub use splitter::{BreakKind, BreakPoint, find_break_point, split_text};
pub use unit::{DeliverableUnit, PartInfo, UnitKind};

pub(crate) use splitter::byte_offset_of_char;
