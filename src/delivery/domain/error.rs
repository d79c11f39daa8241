//! Error types for delivery configuration.

use thiserror::Error;

/// Errors returned when a [`super::DeliveryConfig`] cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The message limit cannot hold a fenced placeholder.
    #[error("max length {actual} is below the minimum of {minimum} characters")]
    MaxLengthTooSmall {
        /// Configured limit.
        actual: usize,
        /// Smallest accepted limit.
        minimum: usize,
    },

    /// The attachment threshold is zero.
    #[error("attachment threshold must be a positive number of characters")]
    ZeroAttachmentThreshold,

    /// The attachment threshold is larger than one message.
    #[error("attachment threshold {threshold} exceeds max length {max_length}")]
    ThresholdExceedsMaxLength {
        /// Configured threshold.
        threshold: usize,
        /// Configured limit.
        max_length: usize,
    },

    /// The side-artifact caption does not fit in one message.
    #[error("side artifact caption is {actual} characters, above max length {max_length}")]
    CaptionTooLong {
        /// Caption length.
        actual: usize,
        /// Configured limit.
        max_length: usize,
    },
}
